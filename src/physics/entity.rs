//! Entity components: physical state plus a tagged shape.
//!
//! An entity in the engine's arena carries a [`Body`] and a [`Shape`].
//! Children of a group additionally carry [`ChildOf`]. Entities are described
//! up front with an [`EntityDesc`] and handed to
//! [`PhysicsEngine::add_entity`](super::PhysicsEngine::add_entity).

use glam::Vec2;

use crate::geometry::{Circle, Polygon};

/// Physical state of an entity.
///
/// A body with `mass == 0.0` is static: gravity, penetration correction,
/// impulses and integration all leave it untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f32,
    /// Surface friction (0.0 - 1.0).
    pub friction: f32,
    /// Bounciness (0.0 - 1.0).
    pub restitution: f32,
    /// Displacement per step.
    pub linear_velocity: Vec2,
    /// Degrees per step.
    pub angular_velocity: f32,
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
}

impl Body {
    pub const DEFAULT_RESTITUTION: f32 = 0.5;
    pub const DEFAULT_FRICTION: f32 = 0.4;

    pub fn new(position: Vec2, mass: f32) -> Self {
        Self {
            mass,
            friction: Self::DEFAULT_FRICTION,
            restitution: Self::DEFAULT_RESTITUTION,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            position,
            rotation: 0.0,
        }
    }

    /// Create a new static body.
    pub fn new_static(position: Vec2) -> Self {
        Self::new(position, 0.0)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

/// Rectangle geometry with a lazily rebuilt world-space polygon.
#[derive(Debug, Clone)]
pub struct RectShape {
    width: f32,
    height: f32,
    dirty: bool,
    base_model: Polygon,
    polygon: Polygon,
}

impl RectShape {
    /// A rectangle whose world polygon is built for `position` and `rotation`.
    pub fn new(width: f32, height: f32, position: Vec2, rotation: f32) -> Self {
        let mut shape = Self {
            width,
            height,
            dirty: true,
            base_model: Polygon::rect(width, height, Vec2::ZERO),
            polygon: Polygon::default(),
        };
        shape.update(position, rotation);
        shape
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Axis-aligned model centred at the origin.
    pub fn base_model(&self) -> &Polygon {
        &self.base_model
    }

    /// World-space polygon as of the last [`update`](Self::update).
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the world polygon stale.
    pub fn change(&mut self) {
        self.dirty = true;
    }

    /// Rebuild the world polygon from the base model if it is stale.
    pub fn update(&mut self, position: Vec2, rotation: f32) {
        if self.dirty {
            self.polygon.clone_from_polygon(&self.base_model);
            self.polygon.rotate(rotation);
            self.polygon.move_by(position);
            self.dirty = false;
        }
    }
}

/// What kind of composite a group is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroupKind {
    Composite,
    /// Hollow box of four walls, see [`EntityDesc::boxed`].
    Box {
        width: f32,
        height: f32,
        thickness: f32,
    },
}

/// A composite entity. Children collide individually.
#[derive(Debug, Clone)]
pub struct GroupShape {
    pub kind: GroupKind,
    pub children: Vec<hecs::Entity>,
}

/// Shape of an entity.
#[derive(Debug, Clone)]
pub enum Shape {
    Circle(Circle),
    Rect(RectShape),
    Group(GroupShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Group(GroupShape {
                kind: GroupKind::Composite,
                ..
            }) => ShapeKind::Group,
            Shape::Group(GroupShape {
                kind: GroupKind::Box { .. },
                ..
            }) => ShapeKind::Box,
        }
    }

    pub fn as_group(&self) -> Option<&GroupShape> {
        match self {
            Shape::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }
}

/// Entity discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rect,
    Group,
    Box,
}

/// Marks an entity as owned by a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildOf(pub hecs::Entity);

/// Shape half of an [`EntityDesc`].
#[derive(Debug, Clone, PartialEq)]
pub enum DescShape {
    Circle { radius: f32 },
    Rect { width: f32, height: f32 },
    Group {
        kind: GroupKind,
        children: Vec<EntityDesc>,
    },
}

/// Owned description of an entity, consumed by
/// [`PhysicsEngine::add_entity`](super::PhysicsEngine::add_entity).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDesc {
    pub body: Body,
    pub shape: DescShape,
}

impl EntityDesc {
    pub fn circle(position: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            body: Body::new(position, mass),
            shape: DescShape::Circle { radius },
        }
    }

    pub fn rect(position: Vec2, width: f32, height: f32, mass: f32) -> Self {
        Self {
            body: Body::new(position, mass),
            shape: DescShape::Rect { width, height },
        }
    }

    /// An empty composite; add children with [`compose`](Self::compose).
    pub fn group() -> Self {
        Self {
            body: Body::default(),
            shape: DescShape::Group {
                kind: GroupKind::Composite,
                children: Vec::new(),
            },
        }
    }

    /// A hollow `width` x `height` box centred on `position`, built from four
    /// `thickness`-wide walls that each weigh `mass / 4`.
    pub fn boxed(width: f32, height: f32, thickness: f32, position: Vec2, mass: f32) -> Self {
        let wall_mass = mass * 0.25;
        let half_w = Vec2::new(width * 0.5, 0.0);
        let half_h = Vec2::new(0.0, height * 0.5);

        let children = vec![
            Self::rect(position - half_w, thickness, height, wall_mass),
            Self::rect(position + half_w, thickness, height, wall_mass),
            Self::rect(position - half_h, width, thickness, wall_mass),
            Self::rect(position + half_h, width, thickness, wall_mass),
        ];

        Self {
            body: Body::new(position, mass),
            shape: DescShape::Group {
                kind: GroupKind::Box {
                    width,
                    height,
                    thickness,
                },
                children,
            },
        }
    }

    /// Add a child. Has no effect on circles and rectangles.
    pub fn compose(mut self, child: EntityDesc) -> Self {
        match &mut self.shape {
            DescShape::Group { children, .. } => children.push(child),
            _ => tracing::warn!("compose() called on a non-group entity description"),
        }
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.body.rotation = degrees;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.body.linear_velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, degrees_per_step: f32) -> Self {
        self.body.angular_velocity = degrees_per_step;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.body.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.body.friction = friction;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        match &self.shape {
            DescShape::Circle { .. } => ShapeKind::Circle,
            DescShape::Rect { .. } => ShapeKind::Rect,
            DescShape::Group {
                kind: GroupKind::Composite,
                ..
            } => ShapeKind::Group,
            DescShape::Group {
                kind: GroupKind::Box { .. },
                ..
            } => ShapeKind::Box,
        }
    }

    /// Build the component pair for a leaf description. Groups get an empty
    /// child list; the engine fills it in as it spawns the children.
    pub(crate) fn leaf_components(&self) -> (Body, Shape) {
        let shape = match &self.shape {
            DescShape::Circle { radius } => Shape::Circle(Circle::new(self.body.position, *radius)),
            DescShape::Rect { width, height } => Shape::Rect(RectShape::new(
                *width,
                *height,
                self.body.position,
                self.body.rotation,
            )),
            DescShape::Group { kind, .. } => Shape::Group(GroupShape {
                kind: *kind,
                children: Vec::new(),
            }),
        };
        (self.body, shape)
    }
}
