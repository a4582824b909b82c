//! RigidBody - an oriented rectangle that moves as a unit
//!
//! The body stores its half extents in local coordinates and transforms
//! them to world coordinates using position and rotation.

mod body;
mod vec2;

pub use body::{Material, RigidBody};
pub use vec2::Vec2;
