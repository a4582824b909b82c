use crate::engine::{BodyHandle, PhysicsEngine, PointerJoint};
use crate::rigid_body::Vec2;

/// Drag lifecycle notifications produced by pointer input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    StartDrag(BodyHandle),
    EndDrag(BodyHandle),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Attachment {
    body: BodyHandle,
    local_anchor: Vec2,
}

/// Single-pointer grab handle.
///
/// Tracks the pointer in container coordinates and which body, if any, the
/// current press grabbed. The spring attachment can be detached on its own
/// so a stale grab never re-engages.
#[derive(Clone, Debug)]
pub struct PointerConstraint {
    stiffness: f32,
    max_speed: f32,
    position: Vec2,
    pressed: bool,
    body: Option<BodyHandle>,
    attachment: Option<Attachment>,
}

impl PointerConstraint {
    /// `max_speed` caps the per-axis speed the spring may impart.
    pub fn new(stiffness: f32, max_speed: f32) -> Self {
        Self {
            stiffness,
            max_speed,
            position: Vec2::zero(),
            pressed: false,
            body: None,
            attachment: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Body grabbed by the current press
    pub fn grabbed(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Press at `at`; grabs the topmost dynamic body under the pointer.
    pub fn press<E: PhysicsEngine>(&mut self, engine: &E, at: Vec2) -> Option<PointerEvent> {
        self.position = at;
        self.pressed = true;
        if self.body.is_some() {
            return None;
        }

        let hit = engine.body_at(at)?;
        let local_anchor = engine.world_to_local(hit, at)?;
        self.body = Some(hit);
        self.attachment = Some(Attachment { body: hit, local_anchor });
        Some(PointerEvent::StartDrag(hit))
    }

    pub fn move_to(&mut self, at: Vec2) {
        self.position = at;
    }

    /// Button released: ends the drag if one is in progress.
    pub fn release(&mut self) -> Option<PointerEvent> {
        self.pressed = false;
        self.attachment = None;
        self.body.take().map(PointerEvent::EndDrag)
    }

    /// Drop the spring target and the grabbed body without a release.
    ///
    /// Returns the body that was being dragged.
    pub fn detach(&mut self) -> Option<BodyHandle> {
        self.attachment = None;
        self.body.take()
    }

    /// Spring to hand to the engine for the next step
    pub fn joint(&self) -> Option<PointerJoint> {
        self.attachment.map(|a| PointerJoint {
            body: a.body,
            local_anchor: a.local_anchor,
            target: self.position,
            stiffness: self.stiffness,
            max_speed: self.max_speed,
        })
    }
}
