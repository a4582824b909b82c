//! RigidBodySystem - small impulse solver for oriented rectangles
//!
//! Goals:
//! - Walls are static rectangles, objects are dynamic rectangles.
//! - SAT contact detection, sequential impulses with restitution and friction.
//! - Iterative position correction so stacks settle without sinking.
//!
//! The pointer constraint lives next to the solver because it is applied as
//! a per-step impulse on the grabbed body.

mod collision;
mod pointer;
mod system;

pub use pointer::{PointerConstraint, PointerEvent};
pub use system::{RigidBodySystem, BASE_DELTA_MS, GRAVITY_SCALE};
