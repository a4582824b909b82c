use crate::core::utils::clamp;
use crate::engine::{BodyHandle, EngineSettings, PhysicsEngine, PointerJoint, RectBodyDesc};
use crate::rigid_body::{RigidBody, Vec2};

use super::collision::{find_contacts, Contact};

/// Gravity is multiplied by this before integration (px / ms²)
pub const GRAVITY_SCALE: f32 = 0.001;
/// Velocities are expressed in pixels per step of this length
pub const BASE_DELTA_MS: f32 = 1000.0 / 60.0;

/// Normal speed below which contacts do not bounce
const RESTING_THRESHOLD: f32 = 2.0;
/// Penetration tolerated without correction
const POSITION_SLOP: f32 = 0.05;
/// Share of remaining penetration removed per position iteration
const POSITION_CORRECTION: f32 = 0.4;

/// Manages all rigid bodies in the world
pub struct RigidBodySystem {
    bodies: Vec<RigidBody>,
    settings: EngineSettings,
    pointer_joint: Option<PointerJoint>,
    contacts: Vec<Contact>,
    next_id: u32,
}

impl RigidBodySystem {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            bodies: Vec::new(),
            settings,
            pointer_joint: None,
            contacts: Vec::new(),
            next_id: 0,
        }
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0 as usize)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0 as usize)
    }

    fn integrate_velocities(&mut self, ratio: f32) {
        let gravity = self.settings.gravity * (GRAVITY_SCALE * BASE_DELTA_MS * BASE_DELTA_MS);
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            let damping = (1.0 - body.material.friction_air * ratio).max(0.0);
            body.velocity = body.velocity * damping + gravity * ratio;
            body.angular_vel *= damping;
        }
    }

    fn integrate_positions(&mut self, ratio: f32) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.pos += body.velocity * ratio;
            body.angle += body.angular_vel * ratio;
        }
    }

    /// Drive the grabbed anchor toward the pointer
    fn solve_pointer_joint(&mut self) {
        let Some(joint) = self.pointer_joint else {
            return;
        };
        let iterations = self.settings.constraint_iterations.max(1);
        let Some(body) = self.body_mut(joint.body) else {
            return;
        };
        if body.is_static {
            return;
        }

        for _ in 0..iterations {
            let anchor = body.local_to_world(joint.local_anchor);
            let r = anchor - body.pos;
            let desired = (joint.target - anchor) * joint.stiffness;
            let error = desired - body.point_velocity(anchor);
            let k = body.inv_mass + r.length_squared() * body.inv_inertia;
            if k <= 0.0 {
                return;
            }
            body.apply_impulse_at(error * (1.0 / k), anchor);
        }

        let limit = joint.max_speed;
        body.velocity = Vec2::new(clamp(body.velocity.x, -limit, limit), clamp(body.velocity.y, -limit, limit));
    }

    fn solve_velocities(&mut self) {
        let iterations = self.settings.velocity_iterations.max(1);
        for iteration in 0..iterations {
            for i in 0..self.contacts.len() {
                let contact = self.contacts[i];
                let (a, b) = pair_mut(&mut self.bodies, contact.a, contact.b);
                resolve_contact(a, b, &contact, iteration == 0);
            }
        }
    }

    fn solve_positions(&mut self) {
        for _ in 0..self.settings.position_iterations.max(1) {
            find_contacts(&self.bodies, &mut self.contacts);
            if self.contacts.is_empty() {
                break;
            }
            for i in 0..self.contacts.len() {
                let c = self.contacts[i];
                let (a, b) = pair_mut(&mut self.bodies, c.a, c.b);
                let total = a.inv_mass + b.inv_mass;
                if total <= 0.0 {
                    continue;
                }
                let correction = (c.depth - POSITION_SLOP).max(0.0) * POSITION_CORRECTION / total;
                a.pos -= c.normal * (correction * a.inv_mass);
                b.pos += c.normal * (correction * b.inv_mass);
            }
        }
    }
}

/// Two distinct mutable bodies, `i < j`
fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j);
    let (left, right) = bodies.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, c: &Contact, allow_bounce: bool) {
    let n = c.normal;
    let ra = c.point - a.pos;
    let rb = c.point - b.pos;

    let rel = b.point_velocity(c.point) - a.point_velocity(c.point);
    let vn = rel.dot(n);
    if vn >= 0.0 {
        return;
    }

    let ran = ra.cross(n);
    let rbn = rb.cross(n);
    let k = a.inv_mass + b.inv_mass + ran * ran * a.inv_inertia + rbn * rbn * b.inv_inertia;
    if k <= 0.0 {
        return;
    }

    let restitution = if allow_bounce && -vn > RESTING_THRESHOLD {
        a.material.restitution.max(b.material.restitution)
    } else {
        0.0
    };
    let j = -(1.0 + restitution) * vn / k;
    let impulse = n * j;
    a.apply_impulse_at(-impulse, c.point);
    b.apply_impulse_at(impulse, c.point);

    // Coulomb friction along the contact tangent
    let rel = b.point_velocity(c.point) - a.point_velocity(c.point);
    let tangent = (rel - n * rel.dot(n)).normalize();
    if tangent.length_squared() == 0.0 {
        return;
    }
    let rat = ra.cross(tangent);
    let rbt = rb.cross(tangent);
    let kt = a.inv_mass + b.inv_mass + rat * rat * a.inv_inertia + rbt * rbt * b.inv_inertia;
    if kt <= 0.0 {
        return;
    }
    let mu = a.material.friction.min(b.material.friction);
    let jt = (-rel.dot(tangent) / kt).clamp(-mu * j, mu * j);
    let friction = tangent * jt;
    a.apply_impulse_at(-friction, c.point);
    b.apply_impulse_at(friction, c.point);
}

impl PhysicsEngine for RigidBodySystem {
    fn add_rect(&mut self, desc: RectBodyDesc) -> BodyHandle {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let mut body = RigidBody::new_rect(
            desc.center.x,
            desc.center.y,
            desc.width,
            desc.height,
            desc.material,
            desc.is_static,
            id,
        );
        body.angle = desc.angle;
        self.bodies.push(body);
        BodyHandle(id)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn is_static(&self, body: BodyHandle) -> bool {
        self.body(body).is_some_and(|b| b.is_static)
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| b.pos)
    }

    fn angle(&self, body: BodyHandle) -> Option<f32> {
        self.body(body).map(|b| b.angle)
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| b.velocity)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<f32> {
        self.body(body).map(|b| b.angular_vel)
    }

    fn world_to_local(&self, body: BodyHandle, world: Vec2) -> Option<Vec2> {
        self.body(body).map(|b| b.world_to_local(world))
    }

    fn inertia(&self, body: BodyHandle) -> Option<f32> {
        self.body(body).map(|b| b.inertia)
    }

    fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.pos = pos;
        }
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.body_mut(body).filter(|b| !b.is_static) {
            b.velocity = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: f32) {
        if let Some(b) = self.body_mut(body).filter(|b| !b.is_static) {
            b.angular_vel = angular_velocity;
        }
    }

    fn set_angle(&mut self, body: BodyHandle, angle: f32) {
        if let Some(b) = self.body_mut(body) {
            b.angle = angle;
        }
    }

    fn set_inertia(&mut self, body: BodyHandle, inertia: f32) {
        if let Some(b) = self.body_mut(body) {
            b.set_inertia(inertia);
        }
    }

    fn set_pointer_joint(&mut self, joint: Option<PointerJoint>) {
        self.pointer_joint = joint;
    }

    fn body_at(&self, point: Vec2) -> Option<BodyHandle> {
        // Later bodies are drawn on top
        self.bodies
            .iter()
            .rev()
            .find(|b| !b.is_static && b.contains_point(point))
            .map(|b| BodyHandle(b.id))
    }

    fn step(&mut self, delta_ms: f32) {
        if !(delta_ms > 0.0) {
            return;
        }
        let ratio = delta_ms / BASE_DELTA_MS;

        self.integrate_velocities(ratio);
        self.solve_pointer_joint();
        find_contacts(&self.bodies, &mut self.contacts);
        self.solve_velocities();
        self.integrate_positions(ratio);
        self.solve_positions();
    }
}
