//! Single-pass collision resolution: positional correction, then an impulse
//! response for each body.

use glam::Vec2;

use crate::math::rot90;

use super::contact::CollisionData;
use super::entity::Body;

/// Relative overshoot of the positional correction, keeps resting bodies
/// from sticking together.
const PENETRATION_OVERCORRECTION: f32 = 0.02;

/// Push two overlapping bodies apart.
///
/// Each body moves along the other body's normal. Dynamic bodies split the
/// correction by inverse mass, so the heavier one moves less; against a
/// static body the dynamic one takes all of it. Static bodies never move.
pub fn resolve_penetration(b1: &mut Body, b2: &mut Body, collision: &CollisionData) {
    let total_mass = b1.mass + b2.mass;
    if total_mass == 0.0 {
        return;
    }

    let (share1, share2) = match (b1.is_static(), b2.is_static()) {
        (false, false) => (b2.mass / total_mass, b1.mass / total_mass),
        (false, true) => (1.0, 0.0),
        (true, false) => (0.0, 1.0),
        (true, true) => return,
    };

    let correction = collision.penetration * (1.0 + PENETRATION_OVERCORRECTION);
    b1.position += collision.normal2 * correction * share1;
    b2.position += collision.normal1 * correction * share2;
}

/// Impulse response of `body` hitting a surface with outward `normal` at
/// `hit_point`. `other_mass` is the mass of the body owning that surface.
///
/// The contact velocity includes the tangential velocity of the spin. The
/// normal impulse is scaled by the mass response plus restitution, friction
/// removes a share of the sliding velocity, and the new angular velocity is
/// derived from the tangential part of the impulse, replacing the old one.
///
/// Friction is the body's own coefficient ([`Body::DEFAULT_FRICTION`] is 0.4).
pub fn apply_response(body: &mut Body, hit_point: Vec2, normal: Vec2, other_mass: f32) {
    if body.is_static() {
        return;
    }

    let arm = hit_point - body.position;
    let distance = arm.length();
    let from_origin = arm.normalize_or_zero();
    let tangent = rot90(from_origin);
    let surface = rot90(-normal);

    let spin = body.angular_velocity.to_radians().tan() * distance;
    let contact_velocity = body.linear_velocity + tangent * spin;

    let impulse = (-normal.dot(contact_velocity)).max(0.0);
    let slide = surface.dot(contact_velocity);
    let response = if other_mass == 0.0 {
        1.0
    } else {
        body.mass / (body.mass + other_mass)
    };

    let impulse_vec =
        normal * impulse * (response + body.restitution) - surface * slide * body.friction;

    body.linear_velocity += from_origin * from_origin.dot(impulse_vec);

    if distance > 0.0 {
        let tangent_impulse = impulse_vec.dot(tangent);
        body.angular_velocity = (tangent_impulse / distance).atan().to_degrees();
    }
}

/// Resolve one collision between `b1` (`collision.e1`) and `b2`
/// (`collision.e2`).
pub fn resolve_collision(b1: &mut Body, b2: &mut Body, collision: &CollisionData) {
    resolve_penetration(b1, b2, collision);

    apply_response(b1, collision.hit_point, collision.normal2, b2.mass);
    apply_response(b2, collision.hit_point, collision.normal1, b1.mass);
}
