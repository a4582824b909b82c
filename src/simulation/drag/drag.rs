use crate::core::utils::{clamp, INFINITE_INERTIA};
use crate::domain::{Container, ElementSize};
use crate::engine::{BodyHandle, PhysicsEngine};
use crate::rigid_body::Vec2;

/// Inertia restored when nothing usable was saved at grab time
pub const FALLBACK_INERTIA: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        body: BodyHandle,
        /// Inertia the body had before the grab
        saved_inertia: Option<f32>,
    },
}

/// At most one dragged body.
///
/// While dragging, the body's inertia is infinite so the pointer spring
/// cannot spin it; release restores exactly what was saved.
#[derive(Clone, Debug)]
pub struct DragController {
    state: DragState,
    velocity_limit: f32,
}

impl DragController {
    pub fn new(velocity_limit: f32) -> Self {
        Self {
            state: DragState::Idle,
            velocity_limit,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<BodyHandle> {
        match self.state {
            DragState::Dragging { body, .. } => Some(body),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged().is_some()
    }

    /// `Idle -> Dragging(body)`. Grabbing while another body is held
    /// releases that one first.
    pub fn on_drag_start<E: PhysicsEngine>(&mut self, engine: &mut E, body: BodyHandle) {
        if self.dragged() == Some(body) {
            return;
        }
        self.on_drag_end(engine);

        let saved_inertia = engine.inertia(body);
        engine.set_inertia(body, INFINITE_INERTIA);
        engine.set_velocity(body, Vec2::zero());
        engine.set_angular_velocity(body, 0.0);
        self.state = DragState::Dragging { body, saved_inertia };
    }

    /// `Dragging(body) -> Idle`. Returns `false` when already idle.
    pub fn on_drag_end<E: PhysicsEngine>(&mut self, engine: &mut E) -> bool {
        let DragState::Dragging { body, saved_inertia } = self.state else {
            return false;
        };
        engine.set_inertia(body, restored_inertia(saved_inertia));
        self.state = DragState::Idle;
        true
    }

    /// Keep the dragged body inside the container and cap its speed.
    ///
    /// Runs right before the engine integrates a step. `size` is the cached
    /// element size of the dragged body.
    pub fn before_step<E: PhysicsEngine>(&self, engine: &mut E, container: Container, size: ElementSize) {
        let Some(body) = self.dragged() else {
            return;
        };

        if let Some(pos) = engine.position(body) {
            let clamped = Vec2::new(
                clamp(pos.x, size.half_width(), container.width - size.half_width()),
                clamp(pos.y, size.half_height(), container.height - size.half_height()),
            );
            if clamped != pos {
                engine.set_position(body, clamped);
            }
        }

        if let Some(v) = engine.velocity(body) {
            let limit = self.velocity_limit;
            engine.set_velocity(body, Vec2::new(clamp(v.x, -limit, limit), clamp(v.y, -limit, limit)));
        }
    }
}

/// Saved inertia, unless it is missing, non-positive or NaN
fn restored_inertia(saved: Option<f32>) -> f32 {
    match saved {
        Some(i) if i > 0.0 => i,
        _ => FALLBACK_INERTIA,
    }
}
