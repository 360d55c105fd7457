//! Segment and polygon intersection predicates
//!
//! The building block is a truncated-integer signed area: segments cross only
//! when each one's endpoints land on strictly opposite sides of the other's
//! line. Touching and collinear contact count as no intersection, which is
//! what lets adjacent polygon edges share a vertex without reporting a
//! self-intersection.

use crate::shapes::{Point, Polygon};

/// Twice the signed area of triangle (l1, l2, p), truncated toward zero.
/// Positive and negative values are the two sides of the line l1-l2; zero
/// covers on-the-line as well as any sub-unit area.
#[inline]
fn line_coefficient(p: Point, l1: Point, l2: Point) -> i32 {
    (((p.x - l1.x) * (l2.y - l1.y)) - ((p.y - l1.y) * (l2.x - l1.x))) as i32
}

/// True iff segment u1-u2 properly crosses segment p1-p2.
/// Endpoint contact and collinear overlap are not intersections.
pub fn segments_intersect(u1: Point, u2: Point, p1: Point, p2: Point) -> bool {
    let u1_c = line_coefficient(u1, p1, p2);
    let u2_c = line_coefficient(u2, p1, p2);

    if !((u1_c > 0 && u2_c < 0) || (u2_c > 0 && u1_c < 0)) {
        return false;
    }

    let p1_c = line_coefficient(p1, u1, u2);
    let p2_c = line_coefficient(p2, u1, u2);

    (p1_c > 0 && p2_c < 0) || (p2_c > 0 && p1_c < 0)
}

/// True iff the segment l1-l2 crosses any defined edge of the polygon
pub fn segment_intersects_polygon(l1: Point, l2: Point, poly: &Polygon) -> bool {
    poly.edges().any(|(u1, u2)| segments_intersect(u1, u2, l1, l2))
}

/// True iff any two non-adjacent defined edges of the polygon cross.
///
/// O(E^2): every edge is tested against the whole polygon. Fine at
/// interactive-editing scale (tens of vertices); a sweep line would only
/// pay off far beyond that.
pub fn polygon_self_intersects(poly: &Polygon) -> bool {
    poly.edges()
        .any(|(u1, u2)| segment_intersects_polygon(u1, u2, poly))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_crossing_segments_intersect() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(10.0, 10.0),
            p(0.0, 10.0),
            p(10.0, 0.0)
        ));
    }

    #[test]
    fn test_disjoint_segments_do_not_intersect() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(0.0, 5.0),
            p(10.0, 5.0)
        ));
    }

    #[test]
    fn test_shared_endpoint_is_not_an_intersection() {
        // Adjacent edges meeting at a vertex: signed area is zero on one side
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 0.0),
            p(20.0, 5.0)
        ));
    }

    #[test]
    fn test_collinear_overlap_is_not_an_intersection() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(5.0, 0.0),
            p(15.0, 0.0)
        ));
    }

    #[test]
    fn test_touching_midpoint_is_not_an_intersection() {
        // Endpoint of one segment lies on the interior of the other
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(5.0, 0.0),
            p(5.0, 10.0)
        ));
    }

    #[test]
    fn test_convex_quad_is_simple() {
        let mut poly = Polygon::new();
        poly.add_point(p(0.0, 0.0));
        poly.add_point(p(20.0, 0.0));
        poly.add_point(p(20.0, 20.0));
        poly.close(p(0.0, 20.0));
        assert!(!polygon_self_intersects(&poly));
    }

    #[test]
    fn test_bowtie_order_self_intersects() {
        // Same four corners entered in crossed order
        let mut poly = Polygon::new();
        poly.add_point(p(0.0, 0.0));
        poly.add_point(p(20.0, 20.0));
        poly.add_point(p(20.0, 0.0));
        poly.close(p(0.0, 20.0));
        assert!(polygon_self_intersects(&poly));
    }

    #[test]
    fn test_open_polygon_ignores_wraparound() {
        // Open polyline whose wraparound edge *would* cross edge 1 if the
        // polygon were closed; while open it must count as simple
        let mut poly = Polygon::new();
        poly.add_point(p(0.0, 10.0));
        poly.add_point(p(40.0, 10.0));
        poly.add_point(p(40.0, 30.0));
        poly.add_point(p(60.0, 20.0));
        assert!(!polygon_self_intersects(&poly));

        // A probe segment across a defined edge does report
        assert!(segment_intersects_polygon(p(20.0, 0.0), p(20.0, 20.0), &poly));
    }
}
