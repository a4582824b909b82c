use crate::rigid_body::{RigidBody, Vec2};

/// Contact between two bodies. `normal` points from `a` to `b`.
#[derive(Clone, Copy, Debug)]
pub(super) struct Contact {
    pub a: usize,
    pub b: usize,
    pub normal: Vec2,
    pub depth: f32,
    pub point: Vec2,
}

/// Broadphase: overlapping axis-aligned boxes
#[inline]
pub(super) fn aabb_overlap(a: &RigidBody, b: &RigidBody) -> bool {
    let ea = a.aabb_half_extents();
    let eb = b.aabb_half_extents();
    (a.pos.x - b.pos.x).abs() <= ea.x + eb.x && (a.pos.y - b.pos.y).abs() <= ea.y + eb.y
}

/// Half-length of `body` projected on `axis`
#[inline]
fn projected_radius(body: &RigidBody, axis: Vec2) -> f32 {
    let (ux, uy) = body.axes();
    body.half_width * ux.dot(axis).abs() + body.half_height * uy.dot(axis).abs()
}

/// Separating axis test for two oriented rectangles.
///
/// Returns the axis of least penetration (oriented from `a` to `b`) and the
/// penetration depth, or `None` when a separating axis exists.
pub(super) fn sat(a: &RigidBody, b: &RigidBody) -> Option<(Vec2, f32)> {
    let (ax, ay) = a.axes();
    let (bx, by) = b.axes();
    let d = b.pos - a.pos;

    let mut best_axis = ax;
    let mut best_depth = f32::INFINITY;

    for axis in [ax, ay, bx, by] {
        let overlap = projected_radius(a, axis) + projected_radius(b, axis) - d.dot(axis).abs();
        if overlap <= 0.0 {
            return None;
        }
        if overlap < best_depth {
            best_depth = overlap;
            best_axis = axis;
        }
    }

    if d.dot(best_axis) < 0.0 {
        best_axis = -best_axis;
    }
    Some((best_axis, best_depth))
}

/// Representative contact point: the mean of every corner of one body that
/// lies inside the other. Flat resting faces produce a point at the middle
/// of the shared edge, so they do not rock.
fn contact_point(a: &RigidBody, b: &RigidBody, normal: Vec2) -> Vec2 {
    let mut sum = Vec2::zero();
    let mut n = 0u32;

    for c in b.corners() {
        if a.contains_point(c) {
            sum += c;
            n += 1;
        }
    }
    for c in a.corners() {
        if b.contains_point(c) {
            sum += c;
            n += 1;
        }
    }

    if n > 0 {
        return sum * (1.0 / n as f32);
    }

    // Edge crossing without contained corners: deepest corners of both
    let deepest_b = b
        .corners()
        .into_iter()
        .min_by(|p, q| p.dot(normal).total_cmp(&q.dot(normal)))
        .unwrap_or(b.pos);
    let deepest_a = a
        .corners()
        .into_iter()
        .max_by(|p, q| p.dot(normal).total_cmp(&q.dot(normal)))
        .unwrap_or(a.pos);
    (deepest_a + deepest_b) * 0.5
}

/// Narrowphase for all pairs that involve at least one dynamic body
pub(super) fn find_contacts(bodies: &[RigidBody], out: &mut Vec<Contact>) {
    out.clear();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (a, b) = (&bodies[i], &bodies[j]);
            if a.is_static && b.is_static {
                continue;
            }
            if !aabb_overlap(a, b) {
                continue;
            }
            if let Some((normal, depth)) = sat(a, b) {
                out.push(Contact {
                    a: i,
                    b: j,
                    normal,
                    depth,
                    point: contact_point(a, b, normal),
                });
            }
        }
    }
}
