//! Contact data structures for collision response.

use glam::Vec2;

/// A detected collision between two entities.
///
/// Rebuilt from scratch every step; the entity handles do not own anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionData {
    pub e1: hecs::Entity,
    pub e2: hecs::Entity,
    /// Overlap to cancel along the normals. Always positive once recorded.
    pub penetration: f32,
    /// Contact point in world space.
    pub hit_point: Vec2,
    /// Surface normal of `e1` at the contact, pointing away from `e1`.
    pub normal1: Vec2,
    /// Surface normal of `e2` at the contact, pointing away from `e2`.
    pub normal2: Vec2,
}
