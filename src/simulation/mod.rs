//! Sandbox session - one container, its walls, its objects and the drag
//!
//! The session owns every piece of mutable state and is handed explicitly to
//! the host callbacks:
//! - tick()    - engine driver (deferred actions, drag correction, step)
//! - sync()    - render frame, writes element transforms
//! - pointer_* - input events feeding the drag state machine
//!
//! World construction is in init/, the drag state machine in drag/, the
//! render sync in sync/ and the fixed-step runner in step/.

use crate::core::random::Rng;
use crate::domain::{Container, ElementSize, SandboxError, SimConfig};
use crate::engine::{BodyHandle, PhysicsEngine};
use crate::rigid_body::Vec2;
use crate::rigid_body_system::{PointerConstraint, RigidBodySystem};

#[path = "init/settings.rs"]
mod settings;
#[path = "init/world_builder.rs"]
mod world_builder;
#[path = "drag/drag.rs"]
mod drag;
#[path = "sync/sync.rs"]
mod sync;
#[path = "step/runner.rs"]
mod runner;
#[path = "step/step.rs"]
mod step;
#[path = "schedule/deferred.rs"]
mod deferred;
mod facade;

pub use deferred::{Deferred, DeferredState};
pub use drag::{DragController, DragState, FALLBACK_INERTIA};
pub use facade::Sandbox;
pub use runner::Runner;
pub use sync::{element_transform, sync_frame, ElementTransform, Presenter};
pub use world_builder::{boundary_walls, build_world, spawn_desc, top_wall, Walls};

/// A dynamic body paired with the element it drives.
///
/// `size` is the one measurement used both to create the body and to clamp
/// the rendered position.
#[derive(Clone, Debug)]
pub struct PhysicsObject<H> {
    pub body: BodyHandle,
    pub element: H,
    pub size: ElementSize,
}

/// The simulation session
pub struct SandboxCore<E: PhysicsEngine, H> {
    config: SimConfig,
    container: Container,
    engine: E,
    runner: Runner,
    walls: Walls,
    objects: Vec<PhysicsObject<H>>,
    drag: DragController,
    pointer: PointerConstraint,
    top_wall_timer: Deferred,
}

impl<H> SandboxCore<RigidBodySystem, H> {
    /// Session backed by the built-in rigid body solver
    pub fn with_builtin_engine(
        config: SimConfig,
        container: Container,
        elements: Vec<(H, ElementSize)>,
        now_ms: f64,
    ) -> Result<Self, SandboxError> {
        let engine = RigidBodySystem::new(settings::engine_settings(&config));
        Self::new(config, container, elements, engine, now_ms)
    }
}

impl<E: PhysicsEngine, H> SandboxCore<E, H> {
    /// Build the world and schedule the top wall `top_wall_delay_ms` after
    /// `now_ms`.
    pub fn new(
        config: SimConfig,
        container: Container,
        elements: Vec<(H, ElementSize)>,
        mut engine: E,
        now_ms: f64,
    ) -> Result<Self, SandboxError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| (now_ms as u64 as u32) ^ 0x2545_F491);
        let mut rng = Rng::new(seed);
        let (walls, objects) = world_builder::build_world(&mut engine, container, elements, &config, &mut rng);

        Ok(Self {
            runner: Runner::new(config.time_scale),
            drag: DragController::new(config.drag_velocity_limit),
            pointer: PointerConstraint::new(config.pointer_stiffness, config.drag_velocity_limit),
            top_wall_timer: Deferred::new(now_ms, config.top_wall_delay_ms),
            config,
            container,
            engine,
            walls,
            objects,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn objects(&self) -> &[PhysicsObject<H>] {
        &self.objects
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    /// Top wall handle once the container has been sealed
    pub fn top_wall(&self) -> Option<BodyHandle> {
        self.walls.top
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn pointer(&self) -> &PointerConstraint {
        &self.pointer
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Cached element size of an object body
    pub fn object_size(&self, body: BodyHandle) -> Option<ElementSize> {
        self.objects.iter().find(|o| o.body == body).map(|o| o.size)
    }

    /// Engine driver frame: fire due deferred actions, then run the steps
    /// the runner says are due
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        step::tick(self, now_ms)
    }

    /// A single engine step with the pointer spring and drag correction
    pub fn step_once(&mut self) {
        step::step_once(self);
    }

    /// Render frame: write every element's transform
    pub fn sync<P: Presenter<H>>(&self, presenter: &mut P) -> usize {
        sync_frame(
            &self.engine,
            &self.objects,
            self.container,
            self.config.render_overhang,
            presenter,
        )
    }

    /// Press inside the container. Returns `true` if a drag started.
    pub fn pointer_down(&mut self, at: Vec2) -> bool {
        step::pointer_down(self, at)
    }

    pub fn pointer_move(&mut self, at: Vec2) {
        self.pointer.move_to(at);
    }

    /// Release anywhere. Returns `true` if a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        step::pointer_up(self)
    }

    /// Pointer left the container. Returns `true` if a drag ended.
    pub fn pointer_leave(&mut self) -> bool {
        step::pointer_leave(self)
    }

    /// Stop stepping, end any drag and cancel the pending top wall
    pub fn teardown(&mut self) {
        self.pointer_leave();
        self.top_wall_timer.cancel();
        self.runner.stop();
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_enabled()
    }

    pub fn top_wall_timer(&self) -> &Deferred {
        &self.top_wall_timer
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
