//! Errors reported by the engine API.
//!
//! The simulation step itself never fails; degenerate geometry is absorbed
//! numerically. These errors only come from configuration and handle lookups.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(hecs::Entity),

    #[error("entity {0:?} is owned by a group and cannot be removed on its own")]
    NotTopLevel(hecs::Entity),

    #[error(transparent)]
    Component(#[from] hecs::ComponentError),

    #[error(transparent)]
    Storage(#[from] hecs::NoSuchEntity),

    #[error("gravity direction must be finite and non-zero, got {0:?}")]
    InvalidGravityDirection(glam::Vec2),

    #[error("gravity magnitude must be finite and non-negative, got {0}")]
    InvalidGravityMagnitude(f32),
}
