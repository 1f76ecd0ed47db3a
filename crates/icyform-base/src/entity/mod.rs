//! Entity presets.

pub mod filter;
