//! Process-wide entity registry.
//!
//! Entity fields reference their target by name and resolve it here at
//! conversion and validation time, so schemas can reference each other (or
//! themselves) without ownership cycles. Each name is registered once and
//! never replaced.

use crate::{SchemaError, entity::Entity};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tracing::debug;

///
/// REGISTRY
/// the static data structure
///

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::new()));

// entities are immutable once inserted, so a poisoned lock is still readable
fn registry_read() -> RwLockReadGuard<'static, Registry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn registry_write() -> RwLockWriteGuard<'static, Registry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

///
/// Registry
///

#[derive(Debug, Default)]
pub struct Registry {
    entities: HashMap<&'static str, Arc<Entity>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Entity>> {
        self.entities.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    pub fn insert(&mut self, entity: Entity) -> Result<Arc<Entity>, SchemaError> {
        let name = entity.name();
        if self.entities.contains_key(name) {
            return Err(SchemaError::DuplicateEntity(name.to_string()));
        }

        let entity = Arc::new(entity);
        self.entities.insert(name, Arc::clone(&entity));

        Ok(entity)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entities.keys().copied().collect();
        names.sort_unstable();

        names
    }
}

/// Register `entity` under its name.
pub fn register(entity: Entity) -> Result<Arc<Entity>, SchemaError> {
    let entity = registry_write().insert(entity)?;
    debug!(
        entity = entity.name(),
        fields = entity.fields().len(),
        "registered entity"
    );

    Ok(entity)
}

/// Look up a registered entity.
pub fn get(name: &str) -> Result<Arc<Entity>, SchemaError> {
    registry_read()
        .get(name)
        .ok_or_else(|| SchemaError::UnknownEntity(name.to_string()))
}

#[must_use]
pub fn contains(name: &str) -> bool {
    registry_read().contains(name)
}

/// Run `f` against the registry under a read lock.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&registry_read())
}

///
/// TESTS
///
