//! Narrowphase collision detection between entities.
//!
//! [`entity_to_entity`] dispatches on the shape pair and decomposes groups
//! into their children. The shape-pair routines turn the raw contact points
//! of the [`intersection`](crate::intersection) predicates into a single
//! [`CollisionData`]: one averaged hit point, one averaged normal per side and
//! a penetration depth estimated by casting from each body centre to its own
//! boundary.

use glam::Vec2;

use crate::geometry::Circle;
use crate::intersection::{circle_polygon, polygon_polygon, segment_polygon};

use super::contact::CollisionData;
use super::entity::{Body, RectShape, Shape};

/// Length of the boundary probe ray, in multiples of the rectangle diagonal.
const PROJECTION_RAY_FACTOR: f32 = 11.0;

/// Collision test between two entities of any kind.
///
/// Groups are decomposed: every child of a group is tested against the other
/// side in order and the first hit wins. Two static bodies never collide. A
/// circle against a rectangle always reports the circle as `e1`.
pub fn entity_to_entity(
    world: &hecs::World,
    a: hecs::Entity,
    b: hecs::Entity,
) -> Option<CollisionData> {
    let body_a = *world.get::<&Body>(a).ok()?;
    let body_b = *world.get::<&Body>(b).ok()?;
    let shape_a = world.get::<&Shape>(a).ok()?;
    let shape_b = world.get::<&Shape>(b).ok()?;

    if let Some(group) = shape_b.as_group() {
        return group_to_entity(world, &group.children, a, &body_a);
    }
    if let Some(group) = shape_a.as_group() {
        return group_to_entity(world, &group.children, b, &body_b);
    }

    if body_a.is_static() && body_b.is_static() {
        return None;
    }

    match (&*shape_a, &*shape_b) {
        (Shape::Rect(ra), Shape::Rect(rb)) => rect_to_rect(a, &body_a, ra, b, &body_b, rb),
        (Shape::Circle(ca), Shape::Circle(cb)) => {
            circle_to_circle(a, &body_a, ca, b, &body_b, cb)
        }
        (Shape::Circle(c), Shape::Rect(r)) => circle_to_rect(a, &body_a, c, b, &body_b, r),
        (Shape::Rect(r), Shape::Circle(c)) => circle_to_rect(b, &body_b, c, a, &body_a, r),
        _ => None,
    }
}

fn group_to_entity(
    world: &hecs::World,
    children: &[hecs::Entity],
    other: hecs::Entity,
    other_body: &Body,
) -> Option<CollisionData> {
    children.iter().find_map(|&child| {
        let child_static = world.get::<&Body>(child).ok()?.is_static();
        if child_static && other_body.is_static() {
            return None;
        }
        entity_to_entity(world, other, child)
    })
}

/// Collision between two circles, along the centre-to-centre axis.
pub fn circle_to_circle(
    e1: hecs::Entity,
    b1: &Body,
    c1: &Circle,
    e2: hecs::Entity,
    b2: &Body,
    c2: &Circle,
) -> Option<CollisionData> {
    let dir = b2.position - b1.position;
    let penetration = c1.radius + c2.radius - dir.length();
    if penetration <= 0.0 {
        return None;
    }

    let normal1 = dir.normalize_or_zero();
    Some(CollisionData {
        e1,
        e2,
        penetration,
        hit_point: (b1.position + b2.position) * 0.5,
        normal1,
        normal2: -normal1,
    })
}

/// Collision between two rectangles.
///
/// Returns `None` unless the estimated penetration is strictly positive,
/// which also filters out grazing contacts the polygon test still reports.
pub fn rect_to_rect(
    e1: hecs::Entity,
    b1: &Body,
    r1: &RectShape,
    e2: hecs::Entity,
    b2: &Body,
    r2: &RectShape,
) -> Option<CollisionData> {
    let mut points = Vec::new();
    let mut normals1 = Vec::new();
    let mut normals2 = Vec::new();
    if !polygon_polygon(
        r1.polygon(),
        r2.polygon(),
        &mut points,
        &mut normals1,
        &mut normals2,
    ) || points.is_empty()
    {
        return None;
    }

    let hit_point = average_position(&points);
    let n1 = if normals1.is_empty() {
        (hit_point - b1.position).normalize_or_zero()
    } else {
        average_normal(&normals1)
    };
    let n2 = if normals2.is_empty() {
        (hit_point - b2.position).normalize_or_zero()
    } else {
        average_normal(&normals2)
    };

    let r1k = hit_point - b1.position;
    let r2k = hit_point - b2.position;
    let r1_edge = project_on_edge(r1, b1.position, r1k);
    let r2_edge = project_on_edge(r2, b2.position, r2k);

    let penetration = n2.dot(r2_edge) + n1.dot(r1_edge) - (n2.dot(r2k) + n1.dot(r1k));
    if penetration <= 0.0 {
        return None;
    }

    Some(CollisionData {
        e1,
        e2,
        penetration,
        hit_point,
        normal1: n1,
        normal2: n2,
    })
}

/// Collision between a circle (`e1`) and a rectangle (`e2`).
pub fn circle_to_rect(
    e1: hecs::Entity,
    bc: &Body,
    circle: &Circle,
    e2: hecs::Entity,
    br: &Body,
    rect: &RectShape,
) -> Option<CollisionData> {
    let mut points = Vec::new();
    let mut normals = Vec::new();
    if !circle_polygon(circle, rect.polygon(), &mut points, &mut normals) || points.is_empty() {
        return None;
    }

    let hit_point = average_position(&points);
    let rect_normal = if normals.is_empty() {
        (br.position - bc.position).normalize_or_zero()
    } else {
        average_normal(&normals)
    };

    let ck = hit_point - bc.position;
    let rk = hit_point - br.position;
    let circle_normal = ck.normalize_or_zero();
    let rect_edge = project_on_edge(rect, br.position, rk);

    let penetration =
        rect_normal.dot(rect_edge) + circle.radius - (ck.length() + rect_normal.dot(rk));
    if penetration <= 0.0 {
        return None;
    }

    Some(CollisionData {
        e1,
        e2,
        penetration,
        hit_point,
        normal1: circle_normal,
        normal2: rect_normal,
    })
}

/// Offset from `position` to the rectangle boundary along `direction`.
///
/// Casts a ray well past the rectangle's diagonal and takes the first edge it
/// crosses. If nothing is crossed, falls back to the diagonal length along
/// `direction`.
pub fn project_on_edge(rect: &RectShape, position: Vec2, direction: Vec2) -> Vec2 {
    let max_edge_dist = rect.size().length();
    let dir = direction.normalize_or_zero();
    let ray = dir * max_edge_dist * PROJECTION_RAY_FACTOR;

    let mut points = Vec::new();
    let mut normals = Vec::new();
    segment_polygon(position, position + ray, rect.polygon(), &mut points, &mut normals);

    match points.first() {
        Some(&edge) => edge - position,
        None => dir * max_edge_dist,
    }
}

/// Mean of `points`. Callers must not pass an empty slice.
pub fn average_position(points: &[Vec2]) -> Vec2 {
    debug_assert!(!points.is_empty());
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

/// Normalized sum of `normals`.
///
/// Opposite normals that cancel exactly fall back to the first one. Empty
/// input gives `Vec2::ZERO`.
pub fn average_normal(normals: &[Vec2]) -> Vec2 {
    let sum: Vec2 = normals.iter().copied().sum();
    match normals.first() {
        Some(&first) if sum.length_squared() == 0.0 => first.normalize_or_zero(),
        _ => sum.normalize_or_zero(),
    }
}
