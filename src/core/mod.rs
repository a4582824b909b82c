//! Core utilities shared by every layer of the engine.
//!
//! - utils/   - console logging macros and numeric helpers
//! - random   - deterministic xorshift32 generator used for spawn placement

#[macro_use]
pub mod utils;
pub mod random;
