mod scene;

pub use scene::Scene;

use crate::geometry;
use crate::math2d::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A point in 2D buffer space. Coordinates are real-valued so transform and
/// morph previews keep fractional positions; they are truncated to integers
/// only when plotted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// An ordered, mutable sequence of vertices.
///
/// While open, only the consecutive segments between appended vertices are
/// edges; closing appends a final vertex and adds the wraparound edge back to
/// the first. `complex` is derived - recomputed after every mutation, never
/// set from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Point>,
    closed: bool,
    #[serde(skip)]
    complex: bool,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            closed: false,
            complex: false,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.vertices.len()
    }

    /// Number of currently defined edges: one per vertex appended after the
    /// first, plus the closing edge once the polygon is a cycle.
    #[inline]
    pub fn num_edges(&self) -> usize {
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len().saturating_sub(1)
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    /// Endpoints of defined edge `i`: vertex `i` to vertex `(i+1) % num_points`
    #[inline]
    pub fn edge(&self, i: usize) -> (Point, Point) {
        let n = self.vertices.len();
        (self.vertices[i], self.vertices[(i + 1) % n])
    }

    /// Iterate over the defined edges in modular enumeration order.
    /// An open polygon never yields the not-yet-closed wraparound edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.num_edges()).map(move |i| self.edge(i))
    }

    /// Append a vertex to an open polygon
    pub fn add_point(&mut self, point: Point) {
        debug_assert!(!self.closed, "add_point on a closed polygon");
        self.vertices.push(point);
        self.refresh_complex();
    }

    /// Append the final vertex and close the cycle back to the first
    pub fn close(&mut self, point: Point) {
        debug_assert!(!self.closed, "close on a closed polygon");
        self.vertices.push(point);
        self.closed = true;
        self.refresh_complex();
    }

    /// Move a single vertex (deform), keeping the complex flag current
    pub fn set_vertex(&mut self, index: usize, point: Point) {
        if let Some(v) = self.vertices.get_mut(index) {
            *v = point;
            self.refresh_complex();
        }
    }

    /// Apply an affine transform to every vertex, relative to `origin`
    pub fn apply_transform(&mut self, mat: &Mat3, origin: Point) {
        for v in &mut self.vertices {
            let pos = *mat * Vec3::new(v.x - origin.x, v.y - origin.y, 1.0);
            v.x = pos.x + origin.x;
            v.y = pos.y + origin.y;
        }
        self.refresh_complex();
    }

    /// Recompute the derived self-intersection flag over the defined edges
    pub fn refresh_complex(&mut self) {
        self.complex = geometry::polygon_self_intersects(self);
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_edge_count_over_lifecycle() {
        let mut poly = Polygon::new();
        assert_eq!(poly.num_points(), 0);
        assert_eq!(poly.num_edges(), 0);
        assert!(!poly.is_closed());
        assert!(!poly.is_complex());

        poly.add_point(p(0.0, 0.0));
        assert_eq!(poly.num_edges(), 0);

        poly.add_point(p(10.0, 0.0));
        assert_eq!(poly.num_edges(), 1);

        poly.add_point(p(10.0, 10.0));
        assert_eq!(poly.num_points(), 3);
        assert_eq!(poly.num_edges(), 2);

        // Closing adds the edge into the new vertex plus the wraparound edge
        poly.close(p(0.0, 10.0));
        assert_eq!(poly.num_points(), 4);
        assert_eq!(poly.num_edges(), 4);
        assert!(poly.is_closed());
        assert!(!poly.is_complex());
    }

    #[test]
    fn test_open_polygon_has_no_wraparound_edge() {
        let mut poly = Polygon::new();
        poly.add_point(p(0.0, 0.0));
        poly.add_point(p(10.0, 0.0));
        poly.add_point(p(10.0, 10.0));

        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], (p(0.0, 0.0), p(10.0, 0.0)));
        assert_eq!(edges[1], (p(10.0, 0.0), p(10.0, 10.0)));
    }

    #[test]
    fn test_complex_flag_follows_mutation() {
        // Bowtie vertex order self-intersects once closed
        let mut poly = Polygon::new();
        poly.add_point(p(0.0, 0.0));
        poly.add_point(p(20.0, 20.0));
        poly.add_point(p(20.0, 0.0));
        assert!(!poly.is_complex());
        poly.close(p(0.0, 20.0));
        assert!(poly.is_complex());

        // Untangling by moving one vertex clears the flag
        poly.set_vertex(1, p(20.0, 0.0));
        poly.set_vertex(2, p(20.0, 20.0));
        assert!(!poly.is_complex());
    }

    #[test]
    fn test_apply_transform_about_origin() {
        let mut poly = Polygon::new();
        poly.add_point(p(10.0, 10.0));
        poly.add_point(p(20.0, 10.0));
        poly.add_point(p(20.0, 20.0));
        poly.close(p(10.0, 20.0));

        // Scale x2 about the square's own corner
        poly.apply_transform(&Mat3::scale(2.0, 2.0), p(10.0, 10.0));
        assert_eq!(poly.vertices()[0], p(10.0, 10.0));
        assert_eq!(poly.vertices()[2], p(30.0, 30.0));
        assert!(poly.is_closed());
    }
}
