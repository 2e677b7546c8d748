//! Primitive 2D shapes: circles and closed polygons.

use glam::Vec2;

use crate::math::rotate_deg;

/// A circle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Translate the circle by `offset`.
    pub fn move_by(&mut self, offset: Vec2) {
        self.center += offset;
    }
}

/// A closed polygon. The last vertex connects back to the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned `width` x `height` rectangle centred on `center`.
    pub fn rect(width: f32, height: f32, center: Vec2) -> Self {
        let mut polygon = Self::default();
        polygon.build_rect(width, height, center);
        polygon
    }

    /// Replace the vertices with an axis-aligned rectangle.
    ///
    /// Vertices are emitted as `(-x,-y)`, `(+x,-y)`, `(+x,+y)`, `(-x,+y)`
    /// around `center`. Edge normals from [`crate::math::segment_normal`]
    /// point outward for this winding, and [`crate::intersection::inside`]
    /// depends on it.
    pub fn build_rect(&mut self, width: f32, height: f32, center: Vec2) {
        let half = Vec2::new(width, height) * 0.5;
        self.vertices.clear();
        self.vertices.extend_from_slice(&[
            center + Vec2::new(-half.x, -half.y),
            center + Vec2::new(half.x, -half.y),
            center + Vec2::new(half.x, half.y),
            center + Vec2::new(-half.x, half.y),
        ]);
    }

    /// Reset this polygon to a copy of `other`'s vertices, reusing the
    /// allocation.
    pub fn clone_from_polygon(&mut self, other: &Polygon) {
        self.vertices.clear();
        self.vertices.extend_from_slice(&other.vertices);
    }

    pub fn insert(&mut self, vertex: Vec2) {
        self.vertices.push(vertex);
    }

    pub fn move_by(&mut self, offset: Vec2) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Rotate every vertex about the origin by `degrees`.
    pub fn rotate(&mut self, degrees: f32) {
        for v in &mut self.vertices {
            *v = rotate_deg(*v, degrees);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate edges as `(from, to)` pairs, starting with the closing edge
    /// `last -> first`.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let last = self.vertices.last().copied();
        last.into_iter()
            .chain(self.vertices.iter().copied())
            .zip(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_vertices_eq(a: &Polygon, b: &Polygon) {
        assert_eq!(a.vertices.len(), b.vertices.len());
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert!((*va - *vb).length() < EPS, "{va:?} != {vb:?}");
        }
    }

    #[test]
    fn test_build_rect_winding() {
        let p = Polygon::rect(4.0, 2.0, Vec2::new(10.0, 20.0));
        assert_eq!(
            p.vertices,
            vec![
                Vec2::new(8.0, 19.0),
                Vec2::new(12.0, 19.0),
                Vec2::new(12.0, 21.0),
                Vec2::new(8.0, 21.0),
            ]
        );
    }

    #[test]
    fn test_edges_wrap_from_last() {
        let p = Polygon::rect(2.0, 2.0, Vec2::ZERO);
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], (p.vertices[3], p.vertices[0]));
        assert_eq!(edges[1], (p.vertices[0], p.vertices[1]));
        assert_eq!(edges[3], (p.vertices[2], p.vertices[3]));
        assert_eq!(Polygon::default().edges().count(), 0);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut p = Polygon::new(vec![Vec2::new(1.0, 0.0)]);
        p.rotate(90.0);
        assert!((p.vertices[0] - Vec2::new(0.0, 1.0)).length() < EPS);
    }

    #[test]
    fn test_move_and_insert() {
        let mut p = Polygon::default();
        p.insert(Vec2::ZERO);
        p.insert(Vec2::X);
        p.move_by(Vec2::new(2.0, 3.0));
        assert_eq!(p.vertices, vec![Vec2::new(2.0, 3.0), Vec2::new(3.0, 3.0)]);
    }

    #[test]
    fn test_rebuild_from_base_is_deterministic() {
        let base = Polygon::rect(30.0, 10.0, Vec2::ZERO);
        let position = Vec2::new(120.0, -45.0);

        let mut first = Polygon::default();
        first.clone_from_polygon(&base);
        first.rotate(33.0);
        first.move_by(position);

        // Scribble over it, then rebuild from the same base.
        let mut second = first.clone();
        second.rotate(-12.0);
        second.move_by(Vec2::ONE);
        second.clone_from_polygon(&base);
        second.rotate(33.0);
        second.move_by(position);

        assert_vertices_eq(&first, &second);
    }

    #[test]
    fn test_circle_move() {
        let mut c = Circle::new(Vec2::ZERO, 5.0);
        c.move_by(Vec2::new(1.0, -1.0));
        assert_eq!(c.center, Vec2::new(1.0, -1.0));
        assert_eq!(c.radius, 5.0);
    }
}
