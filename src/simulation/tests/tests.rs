use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use super::*;
use crate::core::utils::is_effectively_infinite;
use crate::engine::{PointerJoint, RectBodyDesc};
use crate::rigid_body_system::BASE_DELTA_MS;

/// Records body state without simulating anything
#[derive(Default)]
struct FakeEngine {
    bodies: Vec<FakeBody>,
    joint: Option<PointerJoint>,
    steps: u32,
}

#[derive(Clone, Default)]
struct FakeBody {
    pos: Vec2,
    velocity: Vec2,
    angular_velocity: f32,
    angle: f32,
    inertia: Option<f32>,
    is_static: bool,
}

impl FakeEngine {
    fn with_body(pos: Vec2, inertia: Option<f32>) -> (Self, BodyHandle) {
        let mut engine = FakeEngine::default();
        engine.bodies.push(FakeBody { pos, inertia, ..FakeBody::default() });
        (engine, BodyHandle(0))
    }

    fn get(&self, body: BodyHandle) -> Option<&FakeBody> {
        self.bodies.get(body.0 as usize)
    }

    fn get_mut(&mut self, body: BodyHandle) -> Option<&mut FakeBody> {
        self.bodies.get_mut(body.0 as usize)
    }
}

impl PhysicsEngine for FakeEngine {
    fn add_rect(&mut self, desc: RectBodyDesc) -> BodyHandle {
        self.bodies.push(FakeBody {
            pos: desc.center,
            angle: desc.angle,
            inertia: Some(1000.0),
            is_static: desc.is_static,
            ..FakeBody::default()
        });
        BodyHandle(self.bodies.len() as u32 - 1)
    }
    fn body_count(&self) -> usize {
        self.bodies.len()
    }
    fn is_static(&self, body: BodyHandle) -> bool {
        self.get(body).is_some_and(|b| b.is_static)
    }
    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.get(body).map(|b| b.pos)
    }
    fn angle(&self, body: BodyHandle) -> Option<f32> {
        self.get(body).map(|b| b.angle)
    }
    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.get(body).map(|b| b.velocity)
    }
    fn angular_velocity(&self, body: BodyHandle) -> Option<f32> {
        self.get(body).map(|b| b.angular_velocity)
    }
    fn world_to_local(&self, body: BodyHandle, world: Vec2) -> Option<Vec2> {
        self.get(body).map(|b| world - b.pos)
    }
    fn inertia(&self, body: BodyHandle) -> Option<f32> {
        self.get(body).and_then(|b| b.inertia)
    }
    fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(b) = self.get_mut(body) {
            b.pos = pos;
        }
    }
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.get_mut(body) {
            b.velocity = velocity;
        }
    }
    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: f32) {
        if let Some(b) = self.get_mut(body) {
            b.angular_velocity = angular_velocity;
        }
    }
    fn set_angle(&mut self, body: BodyHandle, angle: f32) {
        if let Some(b) = self.get_mut(body) {
            b.angle = angle;
        }
    }
    fn set_inertia(&mut self, body: BodyHandle, inertia: f32) {
        if let Some(b) = self.get_mut(body) {
            b.inertia = Some(inertia);
        }
    }
    fn set_pointer_joint(&mut self, joint: Option<PointerJoint>) {
        self.joint = joint;
    }
    fn body_at(&self, point: Vec2) -> Option<BodyHandle> {
        self.bodies
            .iter()
            .rposition(|b| !b.is_static && (b.pos - point).length() < 10.0)
            .map(|i| BodyHandle(i as u32))
    }
    fn step(&mut self, _delta_ms: f32) {
        self.steps += 1;
    }
}

/// Collects transforms per element id
#[derive(Default)]
struct RecordingPresenter {
    frames: HashMap<u32, ElementTransform>,
}

impl Presenter<u32> for RecordingPresenter {
    fn apply(&mut self, element: &u32, transform: ElementTransform) {
        self.frames.insert(*element, transform);
    }
}

const CONTAINER: Container = Container { width: 800.0, height: 600.0 };

fn seeded_config() -> SimConfig {
    SimConfig {
        seed: Some(1234),
        ..SimConfig::default()
    }
}

fn session(elements: Vec<(u32, ElementSize)>) -> SandboxCore<RigidBodySystem, u32> {
    SandboxCore::with_builtin_engine(seeded_config(), CONTAINER, elements, 0.0).unwrap()
}

fn cards(n: u32) -> Vec<(u32, ElementSize)> {
    (0..n).map(|i| (i, ElementSize::new(100.0, 50.0))).collect()
}

// === Drag controller ===

#[test]
fn drag_start_saves_inertia_and_freezes_motion() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(100.0, 100.0), Some(12.0));
    engine.set_velocity(b, Vec2::new(3.0, -4.0));
    engine.set_angular_velocity(b, 0.7);

    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);

    assert_eq!(drag.state(), DragState::Dragging { body: b, saved_inertia: Some(12.0) });
    assert!(is_effectively_infinite(engine.inertia(b).unwrap()));
    assert_eq!(engine.velocity(b), Some(Vec2::zero()));
    assert_eq!(engine.angular_velocity(b), Some(0.0));

    assert!(drag.on_drag_end(&mut engine));
    assert_eq!(engine.inertia(b), Some(12.0));
    assert_eq!(drag.state(), DragState::Idle);
}

#[test]
fn missing_inertia_falls_back_to_one() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(100.0, 100.0), None);
    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);
    assert_eq!(drag.state(), DragState::Dragging { body: b, saved_inertia: None });
    drag.on_drag_end(&mut engine);
    assert_eq!(engine.inertia(b), Some(FALLBACK_INERTIA));
}

#[test]
fn zero_inertia_also_falls_back_to_one() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(100.0, 100.0), Some(0.0));
    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);
    drag.on_drag_end(&mut engine);
    assert_eq!(engine.inertia(b), Some(1.0));
}

#[test]
fn drag_end_twice_is_idempotent() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(100.0, 100.0), Some(12.0));
    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);

    assert!(drag.on_drag_end(&mut engine));
    engine.set_inertia(b, 33.0);
    assert!(!drag.on_drag_end(&mut engine));

    // Second call touched nothing
    assert_eq!(engine.inertia(b), Some(33.0));
    assert_eq!(drag.state(), DragState::Idle);
}

#[test]
fn drag_end_without_start_is_a_no_op() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(100.0, 100.0), Some(5.0));
    let mut drag = DragController::new(20.0);
    assert!(!drag.on_drag_end(&mut engine));
    assert_eq!(engine.inertia(b), Some(5.0));
}

#[test]
fn grabbing_second_body_restores_first() {
    let mut engine = FakeEngine::default();
    engine.bodies.push(FakeBody { inertia: Some(12.0), ..FakeBody::default() });
    engine.bodies.push(FakeBody { inertia: Some(7.0), ..FakeBody::default() });
    let (a, b) = (BodyHandle(0), BodyHandle(1));

    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, a);
    drag.on_drag_start(&mut engine, b);

    assert_eq!(engine.inertia(a), Some(12.0));
    assert_eq!(drag.dragged(), Some(b));
}

#[test]
fn before_step_clamps_extreme_velocity() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(400.0, 300.0), Some(12.0));
    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);

    for v in [500.0, -500.0, 1.0e9, 19.5] {
        engine.set_velocity(b, Vec2::new(v, -v));
        drag.before_step(&mut engine, CONTAINER, ElementSize::new(100.0, 50.0));
        let clamped = engine.velocity(b).unwrap();
        assert!((-20.0..=20.0).contains(&clamped.x));
        assert!((-20.0..=20.0).contains(&clamped.y));
    }
    engine.set_velocity(b, Vec2::new(500.0, 3.0));
    drag.before_step(&mut engine, CONTAINER, ElementSize::new(100.0, 50.0));
    assert_eq!(engine.velocity(b), Some(Vec2::new(20.0, 3.0)));
}

#[test]
fn before_step_keeps_full_extent_inside_container() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(-300.0, 9000.0), Some(12.0));
    let mut drag = DragController::new(20.0);
    drag.on_drag_start(&mut engine, b);
    drag.before_step(&mut engine, CONTAINER, ElementSize::new(100.0, 50.0));
    assert_eq!(engine.position(b), Some(Vec2::new(50.0, 575.0)));

    engine.set_position(b, Vec2::new(9000.0, -40.0));
    drag.before_step(&mut engine, CONTAINER, ElementSize::new(100.0, 50.0));
    assert_eq!(engine.position(b), Some(Vec2::new(750.0, 25.0)));
}

#[test]
fn before_step_is_inert_while_idle() {
    let (mut engine, b) = FakeEngine::with_body(Vec2::new(-300.0, 9000.0), Some(12.0));
    engine.set_velocity(b, Vec2::new(500.0, 0.0));
    let drag = DragController::new(20.0);
    drag.before_step(&mut engine, CONTAINER, ElementSize::new(100.0, 50.0));
    assert_eq!(engine.position(b), Some(Vec2::new(-300.0, 9000.0)));
    assert_eq!(engine.velocity(b), Some(Vec2::new(500.0, 0.0)));
}

// === World builder ===

#[test]
fn session_spawns_one_body_per_element_plus_walls() {
    let s = session(cards(4));
    assert_eq!(s.objects().len(), 4);
    assert_eq!(s.engine().body_count(), 3 + 4);
    assert!(s.top_wall().is_none());
    let walls = s.walls();
    for wall in [walls.bottom, walls.left, walls.right] {
        assert!(s.engine().is_static(wall));
    }
}

#[test]
fn spawned_objects_start_inside_horizontally_and_staggered() {
    let s = session(cards(6));
    for (i, object) in s.objects().iter().enumerate() {
        let pos = s.engine().position(object.body).unwrap();
        assert!((50.0..=750.0).contains(&pos.x), "x = {}", pos.x);
        assert_eq!(pos.y, -500.0 - i as f32 * 200.0);
        let angle = s.engine().angle(object.body).unwrap();
        assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&angle));
        assert!(!s.engine().is_static(object.body));
    }
}

#[test]
fn same_seed_gives_same_layout() {
    let a = session(cards(3));
    let b = session(cards(3));
    for (oa, ob) in a.objects().iter().zip(b.objects()) {
        assert_eq!(a.engine().position(oa.body), b.engine().position(ob.body));
        assert_eq!(a.engine().angle(oa.body), b.engine().angle(ob.body));
    }
}

#[test]
fn zero_objects_builds_only_walls() {
    let s = session(Vec::new());
    assert!(s.objects().is_empty());
    assert_eq!(s.engine().body_count(), 3);
}

#[test]
fn collapsed_element_caches_the_size_its_body_uses() {
    let s = session(vec![(0, ElementSize::new(0.0, 0.0)), (1, ElementSize::new(100.0, 0.0))]);
    for object in s.objects() {
        let body = s.engine().body(object.body).unwrap();
        assert_eq!(object.size.half_width(), body.half_width);
        assert_eq!(object.size.half_height(), body.half_height);
    }
    assert_eq!(s.object_size(s.objects()[0].body), Some(ElementSize::new(1.0, 1.0)));
    assert_eq!(s.object_size(s.objects()[1].body), Some(ElementSize::new(100.0, 1.0)));
}

#[test]
fn invalid_config_is_rejected() {
    let config = SimConfig {
        wall_thickness: -1.0,
        ..seeded_config()
    };
    let err = SandboxCore::<RigidBodySystem, u32>::with_builtin_engine(config, CONTAINER, cards(1), 0.0)
        .err()
        .unwrap();
    assert!(matches!(err, SandboxError::InvalidConfig(_)));
}

// === Top wall ===

#[test]
fn top_wall_appears_after_delay() {
    let mut s = session(cards(1));
    s.tick(4999.0);
    assert!(s.top_wall().is_none());
    s.tick(5001.0);
    let top = s.top_wall().expect("top wall after 5s");
    assert!(s.engine().is_static(top));
    assert_eq!(s.engine().body_count(), 3 + 1 + 1);

    // One-shot
    s.tick(9000.0);
    assert_eq!(s.engine().body_count(), 5);
}

#[test]
fn object_above_container_escapes_until_sealed() {
    let config = SimConfig {
        gravity: crate::domain::Gravity { x: 0.0, y: 0.0 },
        friction_air: 0.0,
        ..seeded_config()
    };
    let mut s = SandboxCore::with_builtin_engine(config, CONTAINER, cards(1), 0.0).unwrap();
    let body = s.objects()[0].body;

    // Just above the container, moving up
    s.engine_mut().set_angle(body, 0.0);
    s.engine_mut().set_position(body, Vec2::new(400.0, -40.0));
    s.engine_mut().set_velocity(body, Vec2::new(0.0, -5.0));
    s.tick(4000.0);
    s.tick(4000.0 + BASE_DELTA_MS as f64 + 0.1);
    assert!(s.top_wall().is_none());
    assert!(s.engine().position(body).unwrap().y < -40.0);
    assert!(s.engine().velocity(body).unwrap().y < 0.0);
}

#[test]
fn top_wall_blocks_upward_motion_once_present() {
    let config = SimConfig {
        gravity: crate::domain::Gravity { x: 0.0, y: 0.0 },
        friction_air: 0.0,
        restitution: 0.0,
        ..seeded_config()
    };
    let mut s = SandboxCore::with_builtin_engine(config, CONTAINER, cards(1), 0.0).unwrap();
    let body = s.objects()[0].body;
    s.tick(5001.0);
    assert!(s.top_wall().is_some());

    s.engine_mut().set_angle(body, 0.0);
    s.engine_mut().set_position(body, Vec2::new(400.0, 60.0));
    s.engine_mut().set_velocity(body, Vec2::new(0.0, -5.0));
    for _ in 0..60 {
        s.step_once();
    }
    // Top edge stays at the container top
    assert!(s.engine().position(body).unwrap().y >= 24.0);
}

#[test]
fn teardown_cancels_pending_top_wall() {
    let mut s = session(cards(1));
    s.teardown();
    assert_eq!(s.top_wall_timer().state(), DeferredState::Cancelled);
    s.tick(6000.0);
    assert!(s.top_wall().is_none());
    assert!(!s.is_running());
}

// === Engine driver ===

#[test]
fn tick_steps_engine_and_objects_fall() {
    let mut s = session(cards(1));
    let body = s.objects()[0].body;
    let y0 = s.engine().position(body).unwrap().y;
    let mut t = 0.0;
    for _ in 0..30 {
        s.tick(t);
        t += BASE_DELTA_MS as f64 + 0.01;
    }
    assert!(s.runner().steps() >= 30);
    assert!(s.engine().position(body).unwrap().y > y0);
}

#[test]
fn objects_settle_inside_container() {
    let mut s = session(cards(3));
    let mut t = 0.0;
    for _ in 0..1200 {
        s.tick(t);
        t += BASE_DELTA_MS as f64 + 0.01;
    }
    for object in s.objects() {
        let pos = s.engine().position(object.body).unwrap();
        assert!(pos.x > 0.0 && pos.x < 800.0, "x = {}", pos.x);
        assert!(pos.y > 0.0 && pos.y < 600.0, "y = {}", pos.y);
    }
}

#[test]
fn drag_correction_runs_before_each_step() {
    let (engine, _) = FakeEngine::with_body(Vec2::zero(), None);
    let mut s: SandboxCore<FakeEngine, u32> =
        SandboxCore::new(seeded_config(), CONTAINER, cards(1), engine, 0.0).unwrap();
    let body = s.objects()[0].body;

    s.engine_mut().set_position(body, Vec2::new(400.0, 300.0));
    assert!(s.pointer_down(Vec2::new(402.0, 301.0)));
    s.engine_mut().set_velocity(body, Vec2::new(-500.0, 500.0));
    s.engine_mut().set_position(body, Vec2::new(-100.0, 300.0));

    s.step_once();
    assert_eq!(s.engine().steps, 1);
    assert_eq!(s.engine().velocity(body), Some(Vec2::new(-20.0, 20.0)));
    assert_eq!(s.engine().position(body), Some(Vec2::new(50.0, 300.0)));
    assert!(s.engine().joint.is_some());
}

// === Pointer ===

#[test]
fn pointer_drag_cycle_through_session() {
    let mut s = session(cards(1));
    let body = s.objects()[0].body;
    s.engine_mut().set_angle(body, 0.0);
    s.engine_mut().set_position(body, Vec2::new(300.0, 300.0));
    let inertia = s.engine().inertia(body).unwrap();

    assert!(s.pointer_down(Vec2::new(310.0, 305.0)));
    assert!(matches!(s.drag_state(), DragState::Dragging { .. }));
    assert!(is_effectively_infinite(s.engine().inertia(body).unwrap()));

    s.pointer_move(Vec2::new(500.0, 200.0));
    for _ in 0..60 {
        s.step_once();
    }
    // Rotation locked while dragged
    assert_eq!(s.engine().angle(body), Some(0.0));
    assert!(s.engine().position(body).unwrap().x > 400.0);

    assert!(s.pointer_up());
    assert_eq!(s.engine().inertia(body), Some(inertia));
    assert!(!s.pointer_up());
}

#[test]
fn fast_drag_keeps_every_body_inside_container() {
    let corners = [
        Vec2::new(1.0, 1.0),
        Vec2::new(799.0, 599.0),
        Vec2::new(799.0, 1.0),
        Vec2::new(1.0, 599.0),
    ];
    let frame = BASE_DELTA_MS as f64 + 0.01;

    for seed in 1..=3 {
        let config = SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        };
        let elements = (0..8).map(|i| (i, ElementSize::new(120.0, 60.0))).collect();
        let mut s = SandboxCore::with_builtin_engine(config, CONTAINER, elements, 0.0).unwrap();

        let mut now = 0.0;
        for _ in 0..500 {
            s.tick(now);
            now += frame;
        }
        assert!(s.top_wall().is_some());

        let grabbed = s.objects()[0].body;
        let at = s.engine().position(grabbed).unwrap();
        assert!(s.pointer_down(at), "seed {seed}: nothing under {at:?}");
        let dragged = s.pointer().grabbed().unwrap();

        let mut fastest = 0.0f32;
        for i in 0..240 {
            s.pointer_move(corners[(i / 10) % corners.len()]);
            s.tick(now);
            now += frame;
            let v = s.engine().velocity(dragged).unwrap();
            fastest = fastest.max(v.x.abs()).max(v.y.abs());
        }
        assert!(fastest <= 60.0, "seed {seed}: dragged body reached {fastest}");

        s.pointer_up();
        for _ in 0..300 {
            s.tick(now);
            now += frame;
        }

        for object in s.objects() {
            let pos = s.engine().position(object.body).unwrap();
            assert!(
                (0.0..=800.0).contains(&pos.x) && (0.0..=600.0).contains(&pos.y),
                "seed {seed}: object {} escaped to {pos:?}",
                object.element
            );
        }
    }
}

#[test]
fn pointer_leave_ends_drag_and_detaches() {
    let mut s = session(cards(1));
    let body = s.objects()[0].body;
    s.engine_mut().set_position(body, Vec2::new(300.0, 300.0));

    assert!(s.pointer_down(Vec2::new(300.0, 300.0)));
    assert!(s.pointer_leave());
    assert_eq!(s.drag_state(), DragState::Idle);
    assert!(!s.pointer().is_attached());
    // Global release afterwards is harmless
    assert!(!s.pointer_up());
}

#[test]
fn release_without_grab_leaves_drag_untouched() {
    let (engine, _) = FakeEngine::with_body(Vec2::new(100.0, 100.0), Some(12.0));
    let mut s: SandboxCore<FakeEngine, u32> =
        SandboxCore::new(seeded_config(), CONTAINER, cards(1), engine, 0.0).unwrap();

    // Press misses every body, so the release carries no drag end
    assert!(!s.pointer_down(Vec2::new(700.0, 590.0)));
    assert!(!s.pointer_up());
    assert_eq!(s.drag_state(), DragState::Idle);

    let body = s.objects()[0].body;
    s.engine_mut().set_position(body, Vec2::new(300.0, 300.0));
    assert!(s.pointer_down(Vec2::new(300.0, 300.0)));
    assert!(s.pointer_up());
    assert_eq!(s.engine().inertia(body), Some(1000.0));
}

#[test]
fn pointer_down_on_empty_space_does_not_drag() {
    let mut s = session(cards(1));
    assert!(!s.pointer_down(Vec2::new(10.0, 590.0)));
    assert_eq!(s.drag_state(), DragState::Idle);
}

// === Sync loop ===

#[test]
fn sync_writes_every_object_within_render_bounds() {
    let mut s = session(cards(5));
    let mut presenter = RecordingPresenter::default();
    let mut t = 0.0;
    for frame in 0..400 {
        s.tick(t);
        t += BASE_DELTA_MS as f64 + 0.01;
        if frame % 10 == 0 {
            assert_eq!(s.sync(&mut presenter), 5);
            for tr in presenter.frames.values() {
                assert!(tr.left >= 0.0 && tr.left <= 700.0);
                assert!(tr.top >= -150.0 && tr.top <= 550.0);
            }
        }
    }
    assert_eq!(presenter.frames.len(), 5);
}

#[test]
fn sync_rotation_matches_body_angle() {
    let s = session(cards(2));
    let mut presenter = RecordingPresenter::default();
    s.sync(&mut presenter);
    for object in s.objects() {
        let angle = s.engine().angle(object.body).unwrap();
        assert_eq!(presenter.frames[&object.element].rotation, angle);
    }
}
