use crate::domain::SimConfig;
use crate::engine::EngineSettings;
use crate::rigid_body::{Material, Vec2};

/// Solver settings taken from the session config
pub(crate) fn engine_settings(config: &SimConfig) -> EngineSettings {
    EngineSettings {
        gravity: Vec2::new(config.gravity.x, config.gravity.y),
        constraint_iterations: config.constraint_iterations,
        position_iterations: config.position_iterations,
        velocity_iterations: config.velocity_iterations,
    }
}

/// Material applied uniformly to every spawned object
pub(crate) fn object_material(config: &SimConfig) -> Material {
    Material {
        restitution: config.restitution,
        friction: config.friction,
        friction_air: config.friction_air,
        density: config.density,
    }
}
