//! Stock building blocks on top of `icyform-core`: schema presets and a
//! deterministic faker for mock data.
#![warn(unreachable_pub)]

pub mod entity;
pub mod faker;

pub use faker::SeededFaker;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{entity::filter, faker::SeededFaker};
}
