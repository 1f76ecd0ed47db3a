//! Build-time configuration.
//!
//! Contract checks guard against schema misuse and wrong argument shapes.
//! They are on in debug builds and can be forced on in release builds with
//! the `contract-checks` feature. Validation of business rules is never
//! affected by this switch.

/// Whether contract checks run in this build.
pub const CONTRACT_CHECKS: bool = cfg!(any(debug_assertions, feature = "contract-checks"));
