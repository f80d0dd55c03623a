use nalgebra::{Point2, Vector3};
use std::ops::{Add, Mul};

const DEGENERATE_EPSILON: f32 = 1e-6;

/// Tolerance on each barycentric coordinate when deciding coverage.
pub const INSIDE_EPSILON: f32 = 0.01;

/// Signed, unnormalized distance of `p` from the line through `a` and `b`.
#[inline(always)]
pub fn point_line_distance(a: Point2<f32>, b: Point2<f32>, p: Point2<f32>) -> f32 {
    (a.y - b.y) * p.x + (b.x - a.x) * p.y + a.x * b.y - b.x * a.y
}

/// Barycentric coordinates of `p` with respect to (v0, v1, v2).
///
/// Each weight is the ratio of `p`'s distance to the opposite edge over the
/// vertex's own distance to that edge. Returns `None` for zero-area triangles.
pub fn barycentric_coordinates(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Option<Vector3<f32>> {
    let d0 = point_line_distance(v1, v2, v0);
    let d1 = point_line_distance(v2, v0, v1);
    let d2 = point_line_distance(v0, v1, v2);

    if d0.abs() < DEGENERATE_EPSILON
        || d1.abs() < DEGENERATE_EPSILON
        || d2.abs() < DEGENERATE_EPSILON
    {
        return None;
    }

    Some(Vector3::new(
        point_line_distance(v1, v2, p) / d0,
        point_line_distance(v2, v0, p) / d1,
        point_line_distance(v0, v1, p) / d2,
    ))
}

/// Coverage test: every coordinate must lie in `[-INSIDE_EPSILON, 1 + INSIDE_EPSILON]`.
#[inline(always)]
pub fn is_inside_triangle(bary: Vector3<f32>) -> bool {
    bary.iter()
        .all(|&c| (-INSIDE_EPSILON..=1.0 + INSIDE_EPSILON).contains(&c))
}

/// Weighted sum of three per-vertex attributes.
#[inline]
pub fn interpolate<T>(bary: Vector3<f32>, a: T, b: T, c: T) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * bary.x + b * bary.y + c * bary.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri() -> (Point2<f32>, Point2<f32>, Point2<f32>) {
        (
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        )
    }

    #[test]
    fn vertices_have_unit_weights() {
        let (a, b, c) = tri();
        assert_relative_eq!(
            barycentric_coordinates(a, a, b, c).unwrap(),
            Vector3::new(1.0, 0.0, 0.0)
        );
        assert_relative_eq!(
            barycentric_coordinates(b, a, b, c).unwrap(),
            Vector3::new(0.0, 1.0, 0.0)
        );
        assert_relative_eq!(
            barycentric_coordinates(c, a, b, c).unwrap(),
            Vector3::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn weights_sum_to_one_regardless_of_winding() {
        let (a, b, c) = tri();
        let p = Point2::new(1.0, 1.5);
        for (x, y, z) in [(a, b, c), (a, c, b), (c, b, a)] {
            let bary = barycentric_coordinates(p, x, y, z).unwrap();
            assert_relative_eq!(bary.sum(), 1.0, epsilon = 1e-6);
            assert!(is_inside_triangle(bary));
        }
    }

    #[test]
    fn degenerate_triangle_has_no_coordinates() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert!(barycentric_coordinates(Point2::new(0.5, 0.0), a, b, c).is_none());
    }

    #[test]
    fn inside_test_bounds_every_coordinate() {
        assert!(is_inside_triangle(Vector3::new(0.2, 0.3, 0.5)));
        assert!(is_inside_triangle(Vector3::new(1.005, -0.0025, -0.0025)));
        assert!(!is_inside_triangle(Vector3::new(0.5, 0.6, -0.1)));
        // A first coordinate past the upper tolerance is outside even though
        // the second one is in range.
        assert!(!is_inside_triangle(Vector3::new(1.015, -0.0075, -0.0075)));
        assert!(!is_inside_triangle(Vector3::new(-0.0075, -0.0075, 1.015)));
    }

    #[test]
    fn outside_points_fail_the_test() {
        let (a, b, c) = tri();
        let bary = barycentric_coordinates(Point2::new(3.0, 3.0), a, b, c).unwrap();
        assert!(!is_inside_triangle(bary));
    }

    #[test]
    fn interpolate_blends_attributes() {
        let bary = Vector3::new(0.5, 0.25, 0.25);
        let v = interpolate(
            bary,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_relative_eq!(v, Vector3::new(0.5, 0.25, 0.25));
        assert_relative_eq!(interpolate(bary, 2.0f32, 4.0, 8.0), 4.0);
    }
}
