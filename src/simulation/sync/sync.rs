use crate::core::utils::clamp;
use crate::domain::{Container, ElementSize};
use crate::engine::PhysicsEngine;
use crate::rigid_body::Vec2;

use super::PhysicsObject;

/// Screen-space placement of one element: top-left offset in px and
/// rotation in radians
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementTransform {
    pub left: f32,
    pub top: f32,
    pub rotation: f32,
}

/// Writes transforms to whatever displays the elements
pub trait Presenter<H> {
    fn apply(&mut self, element: &H, transform: ElementTransform);
}

/// Convert a body center to a clamped top-left element position.
///
/// Horizontal: `[0, container.width - width]`.
/// Vertical: `[-overhang * height, container.height - height]`, so objects
/// still falling in are drawn partly above the container.
pub fn element_transform(
    center: Vec2,
    angle: f32,
    size: ElementSize,
    container: Container,
    overhang: f32,
) -> ElementTransform {
    ElementTransform {
        left: clamp(center.x - size.half_width(), 0.0, container.width - size.width),
        top: clamp(
            center.y - size.half_height(),
            -size.height * overhang,
            container.height - size.height,
        ),
        rotation: angle,
    }
}

/// One render frame: push every object's resolved state to the presenter.
///
/// Returns the number of elements written.
pub fn sync_frame<E, H, P>(
    engine: &E,
    objects: &[PhysicsObject<H>],
    container: Container,
    overhang: f32,
    presenter: &mut P,
) -> usize
where
    E: PhysicsEngine,
    P: Presenter<H>,
{
    let mut written = 0;
    for object in objects {
        let (Some(center), Some(angle)) = (engine.position(object.body), engine.angle(object.body)) else {
            continue;
        };
        presenter.apply(
            &object.element,
            element_transform(center, angle, object.size, container, overhang),
        );
        written += 1;
    }
    written
}
