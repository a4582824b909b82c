pub mod config;
pub mod error;
pub mod geometry;

pub use config::{Gravity, SimConfig};
pub use error::SandboxError;
pub use geometry::{Container, ElementSize};
