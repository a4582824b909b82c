use serde::{Deserialize, Serialize};

use super::error::SandboxError;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { x: 0.0, y: 1.0 }
    }
}

/// Immutable simulation parameters for one session.
///
/// Field names follow the page-side JSON (`frictionAir`, `wallThickness`,
/// ...). Every field is optional in JSON and falls back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SimConfig {
    pub gravity: Gravity,
    pub restitution: f32,
    pub friction: f32,
    pub friction_air: f32,
    pub density: f32,
    pub wall_thickness: f32,
    #[serde(alias = "mouseStiffness")]
    pub pointer_stiffness: f32,

    pub constraint_iterations: u32,
    pub position_iterations: u32,
    pub velocity_iterations: u32,
    pub time_scale: f32,

    /// Delay before the container is sealed from above
    pub top_wall_delay_ms: f64,
    /// Delay between page load and geometry sampling
    pub startup_delay_ms: u32,
    /// Per-axis speed cap for a dragged body (engine units per step)
    pub drag_velocity_limit: f32,
    /// First body spawns this far above the container top
    pub spawn_base_offset: f32,
    /// Extra height added per spawn index
    pub spawn_stagger: f32,
    /// How many element heights may be rendered above the container
    pub render_overhang: f32,
    pub object_selector: String,
    /// Spawn RNG seed, `None` seeds from the host clock
    pub seed: Option<u32>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            restitution: 0.5,
            friction: 0.15,
            friction_air: 0.02,
            density: 0.002,
            wall_thickness: 200.0,
            pointer_stiffness: 0.6,
            constraint_iterations: 10,
            position_iterations: 20,
            velocity_iterations: 16,
            time_scale: 1.0,
            top_wall_delay_ms: 5000.0,
            startup_delay_ms: 100,
            drag_velocity_limit: 20.0,
            spawn_base_offset: 500.0,
            spawn_stagger: 200.0,
            render_overhang: 3.0,
            object_selector: ".object".to_string(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, SandboxError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SandboxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), SandboxError> {
        let finite = [
            ("gravity.x", self.gravity.x),
            ("gravity.y", self.gravity.y),
            ("restitution", self.restitution),
            ("friction", self.friction),
            ("frictionAir", self.friction_air),
            ("density", self.density),
            ("wallThickness", self.wall_thickness),
            ("pointerStiffness", self.pointer_stiffness),
            ("timeScale", self.time_scale),
            ("dragVelocityLimit", self.drag_velocity_limit),
            ("spawnBaseOffset", self.spawn_base_offset),
            ("spawnStagger", self.spawn_stagger),
            ("renderOverhang", self.render_overhang),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite")));
            }
        }
        if !self.top_wall_delay_ms.is_finite() || self.top_wall_delay_ms < 0.0 {
            return Err(invalid("topWallDelayMs must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(invalid("restitution must be in [0, 1]"));
        }
        if self.friction < 0.0 || !(0.0..1.0).contains(&self.friction_air) {
            return Err(invalid("friction must be >= 0 and frictionAir in [0, 1)"));
        }
        if self.density <= 0.0 || self.wall_thickness <= 0.0 {
            return Err(invalid("density and wallThickness must be positive"));
        }
        if self.pointer_stiffness <= 0.0 || self.pointer_stiffness > 1.0 {
            return Err(invalid("pointerStiffness must be in (0, 1]"));
        }
        if self.time_scale < 0.0 || self.drag_velocity_limit <= 0.0 || self.render_overhang < 0.0 {
            return Err(invalid(
                "timeScale and renderOverhang must be >= 0, dragVelocityLimit > 0",
            ));
        }
        if self.position_iterations == 0 || self.velocity_iterations == 0 {
            return Err(invalid("solver iteration counts must be at least 1"));
        }
        if self.object_selector.trim().is_empty() {
            return Err(invalid("objectSelector must not be empty"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SandboxError {
    SandboxError::InvalidConfig(msg.into())
}
