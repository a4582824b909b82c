//! The operation contract the session needs from a physics engine.
//!
//! `RigidBodySystem` is the built-in implementation; tests substitute
//! lightweight fakes to drive the drag controller without a solver.

use crate::rigid_body::{Material, Vec2};

/// Opaque reference to a body owned by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// Everything needed to create a rectangular body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectBodyDesc {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub material: Material,
    pub is_static: bool,
}

impl RectBodyDesc {
    /// Immovable boundary rectangle
    pub fn wall(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
            angle: 0.0,
            material: Material::default(),
            is_static: true,
        }
    }

    pub fn dynamic(center: Vec2, width: f32, height: f32, angle: f32, material: Material) -> Self {
        Self { center, width, height, angle, material, is_static: false }
    }
}

/// Spring between the pointer and an anchor on a grabbed body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerJoint {
    pub body: BodyHandle,
    /// Grab point in the body's local frame
    pub local_anchor: Vec2,
    /// Pointer position in world space
    pub target: Vec2,
    pub stiffness: f32,
    /// Per-axis cap on the speed the spring may give the body
    pub max_speed: f32,
}

/// Solver settings applied when the engine is created
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineSettings {
    pub gravity: Vec2,
    pub constraint_iterations: u32,
    pub position_iterations: u32,
    pub velocity_iterations: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 1.0),
            constraint_iterations: 2,
            position_iterations: 6,
            velocity_iterations: 4,
        }
    }
}

pub trait PhysicsEngine {
    /// Add a rectangle to the world and return its handle
    fn add_rect(&mut self, desc: RectBodyDesc) -> BodyHandle;

    fn body_count(&self) -> usize;

    fn is_static(&self, body: BodyHandle) -> bool;

    fn position(&self, body: BodyHandle) -> Option<Vec2>;
    fn angle(&self, body: BodyHandle) -> Option<f32>;
    fn velocity(&self, body: BodyHandle) -> Option<Vec2>;
    fn angular_velocity(&self, body: BodyHandle) -> Option<f32>;
    /// World position to the body's local frame
    fn world_to_local(&self, body: BodyHandle, world: Vec2) -> Option<Vec2>;

    /// Rotational inertia, `None` when the engine has no value recorded
    fn inertia(&self, body: BodyHandle) -> Option<f32>;

    fn set_position(&mut self, body: BodyHandle, pos: Vec2);
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2);
    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: f32);
    fn set_angle(&mut self, body: BodyHandle, angle: f32);
    fn set_inertia(&mut self, body: BodyHandle, inertia: f32);

    /// Install or clear the pointer spring solved during `step`
    fn set_pointer_joint(&mut self, joint: Option<PointerJoint>);

    /// Topmost dynamic body under `point`
    fn body_at(&self, point: Vec2) -> Option<BodyHandle>;

    /// Advance the world by `delta_ms` milliseconds
    fn step(&mut self, delta_ms: f32);
}
