//! Pairwise geometric intersection predicates.
//!
//! Every predicate appends what it finds (points, edge normals) to
//! caller-owned vectors and never clears them, so results of several calls
//! can be accumulated. Degenerate input (empty polygons, zero-length
//! segments) reports "no intersection".

use glam::Vec2;

use crate::geometry::{Circle, Polygon};
use crate::math::{above, get_normal, mix, segment_normal, sign};

/// Discriminant threshold separating a real two-point crossing from a
/// tangential touch in [`circle_line`].
pub const TANGENT_EPSILON: f32 = 0.01;

/// Intersection of two circles.
///
/// True iff `r1 + r2 > |c2 - c1|`; touching circles do not intersect. When
/// the outlines cross, the two crossing points are appended to `out_p`.
/// Nested or concentric circles still intersect but have no crossing points.
pub fn circle_circle(c1: &Circle, c2: &Circle, out_p: &mut Vec<Vec2>) -> bool {
    let dir = c2.center - c1.center;
    let d = dir.length();
    if c1.radius + c2.radius - d <= 0.0 {
        return false;
    }
    if d <= 0.0 {
        return true;
    }

    // Distance from c1 to the radical line, and half the chord length.
    let a = (d * d + c1.radius * c1.radius - c2.radius * c2.radius) / (2.0 * d);
    let h2 = c1.radius * c1.radius - a * a;
    if h2 < 0.0 {
        return true;
    }

    let chord_center = c1.center + dir * (a / d);
    let offset = get_normal(dir) * h2.sqrt();
    out_p.push(chord_center - offset);
    out_p.push(chord_center + offset);
    true
}

/// Crossing point of segments `s1a -> s1b` and `s2a -> s2b`.
///
/// The endpoints of segment 2 must lie on opposite sides of segment 1's line
/// and the crossing must fall strictly inside segment 1, so segments that only
/// share an endpoint do not intersect. Collinear segments never intersect.
pub fn segment_segment(s1a: Vec2, s1b: Vec2, s2a: Vec2, s2b: Vec2) -> Option<Vec2> {
    let rs1b = s1b - s1a;
    let rs2a = s2a - s1a;
    let rs2b = s2b - s1a;

    let tangent = rs1b.normalize_or_zero();
    let n = get_normal(rs1b);

    let da = rs2a.dot(n);
    let db = rs2b.dot(n);
    // An endpoint on the line is on neither side.
    if da * db >= 0.0 {
        return None;
    }

    let t = da / (da - db);
    let local = mix(rs2a, rs2b, t);
    let along = local.dot(tangent);
    if along > 0.0 && along < rs1b.length() {
        Some(s1a + local)
    } else {
        None
    }
}

/// Crossings of the segment `sa -> sb` with every edge of `polygon`.
///
/// For each crossed edge the point goes to `out_p` and the edge normal to
/// `out_n`.
pub fn segment_polygon(
    sa: Vec2,
    sb: Vec2,
    polygon: &Polygon,
    out_p: &mut Vec<Vec2>,
    out_n: &mut Vec<Vec2>,
) -> bool {
    let mut hit = false;
    for (prev, next) in polygon.edges() {
        if let Some(point) = segment_segment(sa, sb, prev, next) {
            out_p.push(point);
            out_n.push(segment_normal(prev, next));
            hit = true;
        }
    }
    hit
}

/// Edge crossings between two polygons.
///
/// Crossing points go to `out_p`, normals of the crossed `p2` edges to
/// `out_n2`, and for each `p1` edge that crossed anything its own normal goes
/// to `out_n1`. Edges fully inside the other polygon are not reported; see
/// [`inside_points`].
pub fn intersection_points(
    p1: &Polygon,
    p2: &Polygon,
    out_p: &mut Vec<Vec2>,
    out_n1: &mut Vec<Vec2>,
    out_n2: &mut Vec<Vec2>,
) -> bool {
    if p1.is_empty() || p2.is_empty() {
        return false;
    }

    let mut hit = false;
    for (prev, next) in p1.edges() {
        if segment_polygon(prev, next, p2, out_p, out_n2) {
            out_n1.push(segment_normal(prev, next));
            hit = true;
        }
    }
    hit
}

/// Vertices of `p1` strictly inside `p2`.
///
/// Each such vertex goes to `out_p` together with the mean of its two
/// adjacent edge normals in `out_n`.
pub fn inside_points(
    p1: &Polygon,
    p2: &Polygon,
    out_p: &mut Vec<Vec2>,
    out_n: &mut Vec<Vec2>,
) -> bool {
    let count = p1.vertices.len();
    if count < 2 || p2.is_empty() {
        return false;
    }

    let mut hit = false;
    let mut prev2 = p1.vertices[count - 2];
    let mut prev = p1.vertices[count - 1];
    for &next in &p1.vertices {
        if inside(prev, p2) {
            let normal = (segment_normal(prev2, prev) + segment_normal(prev, next)) * 0.5;
            out_p.push(prev);
            out_n.push(normal);
            hit = true;
        }
        prev2 = prev;
        prev = next;
    }
    hit
}

/// Intersection of two polygons: edge crossings plus penetrating corners in
/// both directions.
///
/// A polygon nested entirely inside the other has no edge crossings and is
/// caught by the corner test.
pub fn polygon_polygon(
    p1: &Polygon,
    p2: &Polygon,
    out_p: &mut Vec<Vec2>,
    out_n1: &mut Vec<Vec2>,
    out_n2: &mut Vec<Vec2>,
) -> bool {
    let mut hit = intersection_points(p1, p2, out_p, out_n1, out_n2);
    hit |= inside_points(p1, p2, out_p, out_n1);
    hit |= inside_points(p2, p1, out_p, out_n2);
    hit
}

/// Intersection of `circle` with the infinite line through `l1` and `l2`.
///
/// `l1` and `l2` are relative to the circle centre, and so are the appended
/// points. Only proper two-point crossings count; a tangential touch (within
/// [`TANGENT_EPSILON`]) reports no intersection.
pub fn circle_line(circle: &Circle, l1: Vec2, l2: Vec2, out_p: &mut Vec<Vec2>) -> bool {
    let d = l2 - l1;
    let dr2 = d.dot(d);
    let det = l1.x * l2.y - l2.x * l1.y;
    let delta = circle.radius * circle.radius * dr2 - det * det;

    if delta <= TANGENT_EPSILON || dr2 <= 0.0 {
        return false;
    }

    let sqrt_delta = delta.sqrt();
    let sx = sign(d.y) * d.x * sqrt_delta;
    let sy = d.y.abs() * sqrt_delta;
    out_p.push(Vec2::new(det * d.y - sx, -det * d.x - sy) / dr2);
    out_p.push(Vec2::new(det * d.y + sx, -det * d.x + sy) / dr2);
    true
}

/// Intersection of `circle` with the segment `s1 -> s2`, in world space.
///
/// Crossing points strictly between the endpoints are appended.
pub fn circle_segment(circle: &Circle, s1: Vec2, s2: Vec2, out_p: &mut Vec<Vec2>) -> bool {
    let l1 = s1 - circle.center;
    let l2 = s2 - circle.center;

    let mut local = Vec::with_capacity(2);
    if !circle_line(circle, l1, l2, &mut local) {
        return false;
    }

    let segment = l2 - l1;
    let dir = segment.normalize_or_zero();
    let length = segment.length();

    let mut hit = false;
    for point in local {
        let t = dir.dot(point - l1) / length;
        if t > 0.0 && t < 1.0 {
            out_p.push(circle.center + point);
            hit = true;
        }
    }
    hit
}

/// Intersection of `circle` with every edge of `polygon`.
///
/// Crossing points go to `out_p`; each crossed edge contributes its normal
/// once to `out_n`.
pub fn circle_polygon(
    circle: &Circle,
    polygon: &Polygon,
    out_p: &mut Vec<Vec2>,
    out_n: &mut Vec<Vec2>,
) -> bool {
    let mut hit = false;
    for (prev, next) in polygon.edges() {
        if circle_segment(circle, prev, next, out_p) {
            out_n.push(segment_normal(prev, next));
            hit = true;
        }
    }
    hit
}

/// True when `point` is strictly inside every edge of `polygon`.
///
/// Assumes the winding of [`Polygon::build_rect`]. Empty polygons contain
/// nothing.
pub fn inside(point: Vec2, polygon: &Polygon) -> bool {
    !polygon.is_empty() && polygon.edges().all(|(prev, next)| above(point, prev, next))
}
