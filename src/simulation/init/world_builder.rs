use std::f32::consts::FRAC_PI_2;

use crate::core::random::Rng;
use crate::domain::{Container, ElementSize, SimConfig};
use crate::engine::{BodyHandle, PhysicsEngine, RectBodyDesc};
use crate::rigid_body::{Material, Vec2};

use super::PhysicsObject;

/// Static boundary bodies. `top` stays `None` until the delayed seal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walls {
    pub bottom: BodyHandle,
    pub left: BodyHandle,
    pub right: BodyHandle,
    pub top: Option<BodyHandle>,
}

/// Bottom, left and right walls, inner edges flush with the container.
///
/// Each spans `size + 2 * thickness` so the corners have no gaps.
pub fn boundary_walls(container: Container, thickness: f32) -> [RectBodyDesc; 3] {
    let (w, h, t) = (container.width, container.height, thickness);
    [
        RectBodyDesc::wall(Vec2::new(w / 2.0, h + t / 2.0), w + t * 2.0, t),
        RectBodyDesc::wall(Vec2::new(-t / 2.0, h / 2.0), t, h + t * 2.0),
        RectBodyDesc::wall(Vec2::new(w + t / 2.0, h / 2.0), t, h + t * 2.0),
    ]
}

/// Wall that seals the container from above
pub fn top_wall(container: Container, thickness: f32) -> RectBodyDesc {
    let (w, t) = (container.width, thickness);
    RectBodyDesc::wall(Vec2::new(w / 2.0, -t / 2.0), w + t * 2.0, t)
}

/// Spawn placement for the object at `index`.
///
/// Horizontal center is uniform over the range that keeps the whole body
/// inside the container; vertical center starts above the visible area,
/// one stagger step higher per index; rotation is uniform in [-π/2, π/2].
pub fn spawn_desc(
    index: usize,
    size: ElementSize,
    container: Container,
    config: &SimConfig,
    material: Material,
    rng: &mut Rng,
) -> RectBodyDesc {
    let x = rng.range(size.half_width(), container.width - size.half_width());
    let y = -config.spawn_base_offset - index as f32 * config.spawn_stagger;
    let angle = rng.range(-FRAC_PI_2, FRAC_PI_2);
    RectBodyDesc::dynamic(Vec2::new(x, y), size.width, size.height, angle, material)
}

/// Create the three initial walls and one dynamic body per element.
pub fn build_world<E: PhysicsEngine, H>(
    engine: &mut E,
    container: Container,
    elements: Vec<(H, ElementSize)>,
    config: &SimConfig,
    rng: &mut Rng,
) -> (Walls, Vec<PhysicsObject<H>>) {
    console_log!("Container dimensions: {} x {}", container.width, container.height);

    let [bottom, left, right] = boundary_walls(container, config.wall_thickness);
    let walls = Walls {
        bottom: engine.add_rect(bottom),
        left: engine.add_rect(left),
        right: engine.add_rect(right),
        top: None,
    };

    console_log!("Found {} objects", elements.len());

    let material = super::settings::object_material(config);
    let mut objects = Vec::with_capacity(elements.len());
    for (index, (element, sampled)) in elements.into_iter().enumerate() {
        if sampled.is_degenerate() {
            console_warn!(
                "Object {} measured {} x {}, using a {} px minimum",
                index,
                sampled.width,
                sampled.height,
                ElementSize::MIN_EXTENT
            );
        }
        // Cached size must match the body exactly
        let size = sampled.body_extent();
        let desc = spawn_desc(index, size, container, config, material, rng);
        let body = engine.add_rect(RectBodyDesc { angle: 0.0, ..desc });
        engine.set_angle(body, desc.angle);
        objects.push(PhysicsObject { body, element, size });
    }

    console_log!("Added {} physics bodies", objects.len());
    (walls, objects)
}
