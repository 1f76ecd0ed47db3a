//! Deterministic mock-data generator.
//!
//! [`SeededFaker`] satisfies the core [`Faker`] contract with a table of
//! generators keyed by dotted path (`"random.uuid"`, `"lorem.words"`, ...),
//! all drawing from one ChaCha stream so a seed reproduces a whole mock run.

mod generators;
mod words;

pub use generators::{GenerateFn, REFERENCE_TIMESTAMP};

use icyform_core::{SchemaError, mock::Faker};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value as JsonValue;
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::trace;

///
/// Generator
///

pub type Generator =
    Arc<dyn Fn(&mut dyn RngCore, &[JsonValue]) -> Result<JsonValue, SchemaError> + Send + Sync>;

///
/// SeededFaker
///

#[derive(Clone)]
pub struct SeededFaker {
    rng: ChaCha8Rng,
    generators: BTreeMap<String, Generator>,
}

impl SeededFaker {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let generators = generators::STOCK
            .iter()
            .map(|&(path, generate)| {
                let generator: Generator = Arc::new(generate);
                (path.to_string(), generator)
            })
            .collect();

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            generators,
        }
    }

    /// Add a generator at `path`, replacing any stock generator there.
    pub fn register<F>(&mut self, path: impl Into<String>, generate: F)
    where
        F: Fn(&mut dyn RngCore, &[JsonValue]) -> Result<JsonValue, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        self.generators.insert(path.into(), Arc::new(generate));
    }

    #[must_use]
    pub fn with_generator<F>(mut self, path: impl Into<String>, generate: F) -> Self
    where
        F: Fn(&mut dyn RngCore, &[JsonValue]) -> Result<JsonValue, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        self.register(path, generate);
        self
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.generators.contains_key(path)
    }

    /// Registered generator paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

impl Default for SeededFaker {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Debug for SeededFaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededFaker")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Faker for SeededFaker {
    fn generate(&mut self, path: &str, args: &[JsonValue]) -> Result<JsonValue, SchemaError> {
        let generate = self
            .generators
            .get(path)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownGenerator(path.to_string()))?;

        trace!(path, "generating mock value");

        generate(&mut self.rng, args)
    }

    fn pick(&mut self, len: usize) -> usize {
        generators::below(&mut self.rng, len)
    }
}

///
/// TESTS
///
