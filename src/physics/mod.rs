//! 2D rigid body simulation with exhaustive collision detection.
//!
//! # Architecture
//!
//! Each call to [`PhysicsEngine::update_entities`] runs one step:
//!
//! 1. Apply gravity to massive top-level bodies
//! 2. Collect collisions between every unordered pair of top-level entities
//!    (groups are decomposed into their children)
//! 3. Resolve each collision: positional correction, then impulse response
//! 4. Integrate positions and rotations, damp velocities, rebuild shapes
//!
//! Entities live in a `hecs::World` owned by the engine. Every entity has a
//! [`Body`] and a [`Shape`]; group children also carry [`ChildOf`].

pub mod contact;
pub mod entity;
pub mod narrowphase;
pub mod rigid_body;
pub mod solver;

use glam::Vec2;
use tracing::{debug, trace};

use crate::error::PhysicsError;

use self::contact::CollisionData;
use self::entity::{
    Body, ChildOf, DescShape, EntityDesc, GroupKind, GroupShape, Shape, ShapeKind,
};
use self::narrowphase::entity_to_entity;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f32 = 9.80665;
/// Scene units per meter used by the default configuration.
pub const PIXELS_PER_METER: f32 = 2.0;

/// Configuration for the physics simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    /// Direction of gravity. Default: (0, 1), "down" in screen coordinates.
    pub gravity_direction: Vec2,
    /// Gravity acceleration in scene units. Default: 9.80665 / 2.
    pub gravity_magnitude: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_direction: Vec2::Y,
            gravity_magnitude: STANDARD_GRAVITY / PIXELS_PER_METER,
        }
    }
}

impl PhysicsConfig {
    /// Check the configuration and normalize the gravity direction.
    pub fn validate(mut self) -> Result<Self, PhysicsError> {
        let dir = self.gravity_direction;
        if !dir.is_finite() || dir.length_squared() == 0.0 {
            return Err(PhysicsError::InvalidGravityDirection(dir));
        }
        if !self.gravity_magnitude.is_finite() || self.gravity_magnitude < 0.0 {
            return Err(PhysicsError::InvalidGravityMagnitude(self.gravity_magnitude));
        }
        self.gravity_direction = dir.normalize();
        Ok(self)
    }

    /// Gravity as a single acceleration vector.
    pub fn gravity(&self) -> Vec2 {
        self.gravity_direction * self.gravity_magnitude
    }
}

/// Read-only view of an entity, for renderers and inspection.
pub struct EntityView<'a> {
    pub handle: hecs::Entity,
    pub body: Body,
    shape: hecs::Ref<'a, Shape>,
}

impl<'a> EntityView<'a> {
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Degrees.
    pub fn rotation(&self) -> f32 {
        self.body.rotation
    }

    /// Radius of a circle.
    pub fn radius(&self) -> Option<f32> {
        match &*self.shape {
            Shape::Circle(circle) => Some(circle.radius),
            _ => None,
        }
    }

    /// Width and height of a rectangle.
    pub fn size(&self) -> Option<Vec2> {
        match &*self.shape {
            Shape::Rect(rect) => Some(rect.size()),
            _ => None,
        }
    }

    /// World-space vertices of a rectangle.
    pub fn vertices(&self) -> Option<&[Vec2]> {
        match &*self.shape {
            Shape::Rect(rect) => Some(rect.polygon().vertices.as_slice()),
            _ => None,
        }
    }

    /// Kind and dimensions of a group.
    pub fn group_kind(&self) -> Option<GroupKind> {
        self.shape.as_group().map(|group| group.kind)
    }

    /// Child handles of a group, in composition order.
    pub fn children(&self) -> &[hecs::Entity] {
        match &*self.shape {
            Shape::Group(group) => group.children.as_slice(),
            _ => &[],
        }
    }
}

/// The physics engine: owns every entity and the current collision list.
pub struct PhysicsEngine {
    config: PhysicsConfig,
    world: hecs::World,
    roots: Vec<hecs::Entity>,
    collisions: Vec<CollisionData>,
}

impl PhysicsEngine {
    /// Create an empty engine with the given configuration.
    pub fn new(config: PhysicsConfig) -> Result<Self, PhysicsError> {
        let config = config.validate()?;
        debug!(
            gravity_direction = ?config.gravity_direction,
            gravity_magnitude = config.gravity_magnitude,
            "creating physics engine"
        );
        Ok(Self {
            config,
            world: hecs::World::new(),
            roots: Vec::new(),
            collisions: Vec::new(),
        })
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// The underlying entity storage.
    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    /// Number of top-level entities.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Take ownership of a new entity and return its handle.
    ///
    /// Group children are spawned as well and can be looked up through
    /// [`EntityView::children`].
    pub fn add_entity(&mut self, desc: EntityDesc) -> hecs::Entity {
        let kind = desc.kind();
        let handle = self.spawn(desc, None);
        self.roots.push(handle);
        debug!(?handle, ?kind, "added entity");
        handle
    }

    fn spawn(&mut self, desc: EntityDesc, parent: Option<hecs::Entity>) -> hecs::Entity {
        let (body, shape) = desc.leaf_components();
        let handle = match parent {
            Some(parent) => self.world.spawn((body, shape, ChildOf(parent))),
            None => self.world.spawn((body, shape)),
        };

        if let DescShape::Group { children, .. } = desc.shape {
            let handles: Vec<_> = children
                .into_iter()
                .map(|child| self.spawn(child, Some(handle)))
                .collect();
            if let Ok(mut shape) = self.world.get::<&mut Shape>(handle) {
                if let Shape::Group(GroupShape { children, .. }) = &mut *shape {
                    *children = handles;
                }
            }
        }
        handle
    }

    /// Remove a top-level entity and everything it owns.
    ///
    /// The collision list is cleared since it may refer to the removed
    /// entities.
    pub fn remove_entity(&mut self, handle: hecs::Entity) -> Result<(), PhysicsError> {
        if !self.world.contains(handle) {
            return Err(PhysicsError::NoSuchEntity(handle));
        }
        let index = self
            .roots
            .iter()
            .position(|&root| root == handle)
            .ok_or(PhysicsError::NotTopLevel(handle))?;

        self.roots.remove(index);
        self.collisions.clear();
        self.despawn_tree(handle)?;
        debug!(?handle, "removed entity");
        Ok(())
    }

    fn despawn_tree(&mut self, handle: hecs::Entity) -> Result<(), PhysicsError> {
        let children = self
            .world
            .get::<&Shape>(handle)
            .ok()
            .and_then(|shape| shape.as_group().map(|group| group.children.clone()))
            .unwrap_or_default();
        for child in children {
            self.despawn_tree(child)?;
        }
        self.world.despawn(handle)?;
        Ok(())
    }

    /// Copy of an entity's physical state.
    pub fn body(&self, handle: hecs::Entity) -> Result<Body, PhysicsError> {
        if !self.world.contains(handle) {
            return Err(PhysicsError::NoSuchEntity(handle));
        }
        Ok(*self.world.get::<&Body>(handle)?)
    }

    /// Overwrite an entity's physical state and rebuild its shape.
    pub fn set_body(&mut self, handle: hecs::Entity, body: Body) -> Result<(), PhysicsError> {
        if !self.world.contains(handle) {
            return Err(PhysicsError::NoSuchEntity(handle));
        }
        *self.world.get::<&mut Body>(handle)? = body;
        let mut shape = self.world.get::<&mut Shape>(handle)?;
        if let Shape::Rect(rect) = &mut *shape {
            rect.change();
        }
        rigid_body::sync_shape(&body, &mut shape);
        Ok(())
    }

    /// View of a single entity, top-level or child.
    pub fn entity(&self, handle: hecs::Entity) -> Result<EntityView<'_>, PhysicsError> {
        if !self.world.contains(handle) {
            return Err(PhysicsError::NoSuchEntity(handle));
        }
        let body = *self.world.get::<&Body>(handle)?;
        let shape = self.world.get::<&Shape>(handle)?;
        Ok(EntityView {
            handle,
            body,
            shape,
        })
    }

    /// Top-level entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> + '_ {
        self.roots
            .iter()
            .filter_map(move |&handle| self.entity(handle).ok())
    }

    /// Collisions detected during the last step.
    pub fn collisions(&self) -> &[CollisionData] {
        &self.collisions
    }

    /// Contact points of the last step's collisions.
    pub fn contact_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.collisions.iter().map(|c| c.hit_point)
    }

    /// Advance the simulation by one step of `elapsed_sec` seconds.
    ///
    /// `elapsed_sec` only scales gravity; velocities are applied once per
    /// step. The caller is responsible for measuring and clamping it.
    pub fn update_entities(&mut self, elapsed_sec: f32) {
        self.apply_gravity(elapsed_sec);
        self.collect_collisions();
        self.resolve_collisions();
        self.advance_transformation();
    }

    pub fn apply_gravity(&mut self, elapsed_sec: f32) {
        rigid_body::apply_gravity(&mut self.world, self.config.gravity(), elapsed_sec);
    }

    /// Rebuild the collision list from scratch.
    ///
    /// Every unordered pair of top-level entities is tested once; a group is
    /// always tested as the right-hand side and two groups are never tested
    /// against each other. Only the first contact per pair is kept.
    pub fn collect_collisions(&mut self) {
        self.collisions.clear();

        for (i, &a) in self.roots.iter().enumerate() {
            let a_is_group = self.is_group(a);
            for &b in &self.roots[i + 1..] {
                let b_is_group = self.is_group(b);
                let (lhs, rhs) = match (a_is_group, b_is_group) {
                    (true, true) => continue,
                    (true, false) => (b, a),
                    _ => (a, b),
                };
                if let Some(collision) = entity_to_entity(&self.world, lhs, rhs) {
                    self.collisions.push(collision);
                }
            }
        }

        trace!(count = self.collisions.len(), "collected collisions");
    }

    fn is_group(&self, handle: hecs::Entity) -> bool {
        self.world
            .get::<&Shape>(handle)
            .map_or(false, |shape| shape.is_group())
    }

    /// Resolve every collision of the current list, in order.
    pub fn resolve_collisions(&mut self) {
        for collision in &self.collisions {
            let (Ok(b1), Ok(b2)) = (
                self.world.get::<&Body>(collision.e1).map(|b| *b),
                self.world.get::<&Body>(collision.e2).map(|b| *b),
            ) else {
                continue;
            };
            let (mut b1, mut b2) = (b1, b2);

            solver::resolve_collision(&mut b1, &mut b2, collision);

            if let Ok(mut body) = self.world.get::<&mut Body>(collision.e1) {
                *body = b1;
            }
            if let Ok(mut body) = self.world.get::<&mut Body>(collision.e2) {
                *body = b2;
            }
        }
    }

    /// Integrate every leaf entity and resync shapes.
    pub fn advance_transformation(&mut self) {
        rigid_body::advance_transformation(&mut self.world);
    }
}
