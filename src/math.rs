//! Scalar and `Vec2` helpers shared by the geometry and collision code.
//!
//! `glam::Vec2` already covers arithmetic, `dot`, `length` and
//! `normalize_or_zero`. The helpers here fix the handedness conventions that
//! every predicate relies on: [`get_normal`] is the outward normal of an edge
//! of a polygon wound the way [`Polygon::build_rect`](crate::geometry::Polygon::build_rect)
//! winds it, and [`rot90`] turns in the same sense as [`rotate_deg`].

use glam::Vec2;

/// Unit normal of a direction: `(d.y, -d.x)` normalized.
///
/// Returns `Vec2::ZERO` for a zero-length direction.
#[inline]
pub fn get_normal(direction: Vec2) -> Vec2 {
    Vec2::new(direction.y, -direction.x).normalize_or_zero()
}

/// Unit normal of the segment `a -> b`.
#[inline]
pub fn segment_normal(a: Vec2, b: Vec2) -> Vec2 {
    get_normal(b - a)
}

/// Quarter turn in the rotation sense of [`rotate_deg`]: `(-v.y, v.x)`.
#[inline]
pub fn rot90(v: Vec2) -> Vec2 {
    v.perp()
}

/// Rotate `v` about the origin by `degrees`.
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn mix(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// `+1.0` for `x >= 0`, `-1.0` otherwise.
///
/// Unlike `f32::signum`, zero (of either sign) maps to `+1.0`, so side tests
/// put points lying exactly on a line on the positive side.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// True when `v` lies strictly on the inner side of the edge `a -> b`.
#[inline]
pub fn above(v: Vec2, a: Vec2, b: Vec2) -> bool {
    (v - a).dot(segment_normal(a, b)) < 0.0
}
