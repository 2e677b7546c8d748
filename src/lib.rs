//! Rein 2D Physics
//!
//! A small 2D rigid body simulator for circles, rectangles and composite
//! groups, built on glam and hecs.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **math** - Vector helpers (normals, rotation, sign tests)
//! 2. **geometry** - Circle and polygon primitives
//! 3. **intersection** - Exhaustive contact point predicates
//! 4. **physics** - Entities, narrowphase, solver and the engine step
//!
//! # Example
//!
//! ```
//! use rein2d::{EntityDesc, PhysicsConfig, PhysicsEngine};
//! use glam::Vec2;
//!
//! let mut physics = PhysicsEngine::new(PhysicsConfig::default())?;
//! physics.add_entity(EntityDesc::boxed(450.0, 450.0, 30.0, Vec2::new(250.0, 250.0), 0.0));
//! let ball = physics.add_entity(EntityDesc::circle(Vec2::new(200.0, 100.0), 10.0, 1.0));
//!
//! for _ in 0..60 {
//!     physics.update_entities(1.0 / 60.0);
//! }
//! assert!(physics.body(ball)?.position.y > 100.0);
//! # Ok::<(), rein2d::PhysicsError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod intersection;
pub mod math;
pub mod physics;

// Re-export commonly used types
pub use error::PhysicsError;

pub use geometry::{Circle, Polygon};

pub use physics::contact::CollisionData;
pub use physics::entity::{
    Body, ChildOf, DescShape, EntityDesc, GroupKind, GroupShape, RectShape, Shape, ShapeKind,
};
pub use physics::{EntityView, PhysicsConfig, PhysicsEngine};

// Re-export dependencies
pub use glam;
pub use hecs;
