//! Rigid body integration functions.

use glam::Vec2;

use super::entity::{Body, ChildOf, Shape};

/// Per-step linear velocity decay, and the band that snaps to zero.
const LINEAR_DAMPING_STEP: f32 = 0.0001;
/// Per-step angular velocity decay (degrees), and the band that snaps to zero.
const ANGULAR_DAMPING_STEP: f32 = 0.001;

/// Apply gravity to every massive top-level body.
///
/// Groups and their children are skipped: a group's walls only move through
/// collision response.
pub fn apply_gravity(world: &mut hecs::World, gravity: Vec2, elapsed_sec: f32) {
    for (_, (body, shape, parent)) in world.query_mut::<(&mut Body, &Shape, Option<&ChildOf>)>() {
        if body.is_static() || parent.is_some() || shape.is_group() {
            continue;
        }
        body.linear_velocity += gravity * elapsed_sec;
    }
}

/// Advance every massive leaf body by its velocities and damp them, then
/// bring derived geometry back in sync.
///
/// Rectangles that moved are marked dirty and rebuilt; circles recentre on
/// their body position.
pub fn advance_transformation(world: &mut hecs::World) {
    for (_, (body, shape)) in world.query_mut::<(&mut Body, &mut Shape)>() {
        if shape.is_group() {
            continue;
        }

        if !body.is_static() {
            body.position += body.linear_velocity;
            body.rotation += body.angular_velocity;

            body.linear_velocity.x = damp(body.linear_velocity.x, LINEAR_DAMPING_STEP);
            body.linear_velocity.y = damp(body.linear_velocity.y, LINEAR_DAMPING_STEP);
            body.angular_velocity = damp(body.angular_velocity, ANGULAR_DAMPING_STEP);

            if let Shape::Rect(rect) = shape {
                rect.change();
            }
        }

        sync_shape(body, shape);
    }
}

/// Bring a leaf shape in line with its body.
pub fn sync_shape(body: &Body, shape: &mut Shape) {
    match shape {
        Shape::Rect(rect) => rect.update(body.position, body.rotation),
        Shape::Circle(circle) => circle.center = body.position,
        Shape::Group(_) => {}
    }
}

/// Move `value` toward zero by `step`, snapping to zero inside `[-step, step]`.
fn damp(value: f32, step: f32) -> f32 {
    if value > step {
        value - step
    } else if value < -step {
        value + step
    } else {
        0.0
    }
}
