use super::vec2::Vec2;
use crate::domain::ElementSize;

/// Surface and mass properties shared by every spawned object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
    /// Fraction of velocity lost per step to drag
    pub friction_air: f32,
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.1,
            friction_air: 0.01,
            density: 0.001,
        }
    }
}

/// Rigid Body - an oriented rectangle that moves as a single unit
#[derive(Clone, Debug)]
pub struct RigidBody {
    // === Physics State ===
    /// World position (center of mass)
    pub pos: Vec2,
    /// Velocity vector (pixels per step)
    pub velocity: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angular velocity (radians per step)
    pub angular_vel: f32,
    pub mass: f32,
    pub inv_mass: f32,
    /// Moment of inertia for rotation. Infinity locks rotation.
    pub inertia: f32,
    pub inv_inertia: f32,
    /// Static bodies never move and have infinite mass
    pub is_static: bool,
    pub id: u32,

    // === Shape ===
    pub half_width: f32,
    pub half_height: f32,

    pub material: Material,
}

impl RigidBody {
    /// Create a rectangular rigid body centered at (x, y)
    pub fn new_rect(x: f32, y: f32, w: f32, h: f32, material: Material, is_static: bool, id: u32) -> Self {
        let w = w.max(ElementSize::MIN_EXTENT);
        let h = h.max(ElementSize::MIN_EXTENT);

        let (mass, inv_mass, inertia, inv_inertia) = if is_static {
            (f32::INFINITY, 0.0, f32::INFINITY, 0.0)
        } else {
            let mass = (material.density * w * h).max(1e-6);
            // I = m (w² + h²) / 12 for a solid rectangle
            let inertia = mass * (w * w + h * h) / 12.0;
            (mass, 1.0 / mass, inertia, 1.0 / inertia)
        };

        Self {
            pos: Vec2::new(x, y),
            velocity: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            is_static,
            id,
            half_width: w * 0.5,
            half_height: h * 0.5,
            material,
        }
    }

    pub fn set_inertia(&mut self, inertia: f32) {
        if self.is_static {
            return;
        }
        self.inertia = inertia;
        self.inv_inertia = if inertia.is_finite() && inertia > 0.0 { 1.0 / inertia } else { 0.0 };
    }

    /// Local unit axes (x along width, y along height)
    #[inline]
    pub fn axes(&self) -> (Vec2, Vec2) {
        let (sin, cos) = self.angle.sin_cos();
        (Vec2::new(cos, sin), Vec2::new(-sin, cos))
    }

    /// Transform local coordinates to world coordinates
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.pos + local.rotate(self.angle)
    }

    #[inline]
    pub fn world_to_local(&self, world: Vec2) -> Vec2 {
        (world - self.pos).rotate(-self.angle)
    }

    /// Corners in world space, clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let (hw, hh) = (self.half_width, self.half_height);
        [
            self.local_to_world(Vec2::new(-hw, -hh)),
            self.local_to_world(Vec2::new(hw, -hh)),
            self.local_to_world(Vec2::new(hw, hh)),
            self.local_to_world(Vec2::new(-hw, hh)),
        ]
    }

    /// Half extents of the axis-aligned box around the rotated rectangle
    pub fn aabb_half_extents(&self) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        Vec2::new(
            self.half_width * cos.abs() + self.half_height * sin.abs(),
            self.half_width * sin.abs() + self.half_height * cos.abs(),
        )
    }

    pub fn contains_point(&self, world: Vec2) -> bool {
        let local = self.world_to_local(world);
        local.x.abs() <= self.half_width && local.y.abs() <= self.half_height
    }

    /// Velocity of a world point rigidly attached to the body
    #[inline]
    pub fn point_velocity(&self, world: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_vel, world - self.pos)
    }

    /// Apply impulse at a world point
    pub fn apply_impulse_at(&mut self, impulse: Vec2, world: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_vel += (world - self.pos).cross(impulse) * self.inv_inertia;
    }
}
