use crate::engine::PhysicsEngine;
use crate::rigid_body::Vec2;
use crate::rigid_body_system::PointerEvent;

use super::SandboxCore;

/// Host frame callback for the engine driver. Returns the steps taken.
pub(super) fn tick<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>, now_ms: f64) -> u32 {
    run_deferred(core, now_ms);
    let steps = core.runner.advance(now_ms);
    for _ in 0..steps {
        step_once(core);
    }
    steps
}

/// Seal the container once the top-wall delay has elapsed
pub(super) fn run_deferred<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>, now_ms: f64) {
    if core.top_wall_timer.poll(now_ms) {
        let desc = super::world_builder::top_wall(core.container, core.config.wall_thickness);
        core.walls.top = Some(core.engine.add_rect(desc));
        console_log!("Top wall added");
    }
}

/// One engine step. The drag correction always sees pre-step state.
pub(super) fn step_once<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>) {
    core.engine.set_pointer_joint(core.pointer.joint());

    if let Some(size) = core.drag.dragged().and_then(|body| core.object_size(body)) {
        core.drag.before_step(&mut core.engine, core.container, size);
    }

    let delta = core.runner.delta_ms();
    core.engine.step(delta);
}

pub(super) fn pointer_down<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>, at: Vec2) -> bool {
    match core.pointer.press(&core.engine, at) {
        Some(PointerEvent::StartDrag(body)) => {
            core.drag.on_drag_start(&mut core.engine, body);
            true
        }
        _ => false,
    }
}

/// Release anywhere in the document
pub(super) fn pointer_up<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>) -> bool {
    match core.pointer.release() {
        Some(PointerEvent::EndDrag(_)) => core.drag.on_drag_end(&mut core.engine),
        _ => false,
    }
}

/// Pointer left the container: detach the spring and end the drag
pub(super) fn pointer_leave<E: PhysicsEngine, H>(core: &mut SandboxCore<E, H>) -> bool {
    core.pointer.detach();
    core.drag.on_drag_end(&mut core.engine)
}
