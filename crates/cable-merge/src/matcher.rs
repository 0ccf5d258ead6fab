//! Endpoint matching: decide whether two coordinates are the same point.
//!
//! The comparison is per axis, not Euclidean. Two points match when
//! each coordinate differs by strictly less than the tolerance, so the
//! accepted region around a point is an open square, not a disc.

use crate::types::Point;

/// Default matching tolerance.
///
/// Cable coordinates are copied between files verbatim, so shared
/// endpoints are normally bit-identical; the tolerance only absorbs
/// float formatting noise.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Whether `p1` and `p2` coincide within `tolerance` on both axes.
///
/// The comparison is strict: a difference of exactly `tolerance` on
/// either axis does not match. A zero tolerance therefore never
/// matches, not even identical points.
///
/// # Examples
///
/// ```
/// use cable_merge::{Point, matcher::close};
///
/// assert!(close(Point::new(1.0, 1.0), Point::new(1.05, 0.95), 0.1));
/// assert!(!close(Point::new(1.0, 1.0), Point::new(1.1, 1.0), 0.1));
/// ```
#[must_use]
pub fn close(p1: Point, p2: Point, tolerance: f64) -> bool {
    (p1.x - p2.x).abs() < tolerance && (p1.y - p2.y).abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_match() {
        let p = Point::new(10.776_53, 106.700_98);
        assert!(close(p, p, DEFAULT_TOLERANCE));
    }

    #[test]
    fn exact_tolerance_on_one_axis_does_not_match() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.5, 0.0);
        assert!(!close(a, b, 0.5));
        assert!(!close(b, a, 0.5));
    }

    #[test]
    fn half_tolerance_on_both_axes_matches() {
        let a = Point::new(2.0, 3.0);
        let b = Point::new(2.25, 3.25);
        assert!(close(a, b, 0.5));
    }

    #[test]
    fn per_axis_not_euclidean() {
        // Euclidean distance is ~0.127, above the tolerance, but each
        // axis is within it.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.09, 0.09);
        assert!((b.x - a.x).hypot(b.y - a.y) > 0.1);
        assert!(close(a, b, 0.1));
    }

    #[test]
    fn one_axis_out_of_range_fails() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 0.2);
        assert!(!close(a, b, 0.1));
    }

    #[test]
    fn zero_tolerance_never_matches() {
        let p = Point::new(1.0, 1.0);
        assert!(!close(p, p, 0.0));
    }

    #[test]
    fn default_tolerance_rejects_visible_gaps() {
        let a = Point::new(10.0, 106.0);
        let b = Point::new(10.000_001, 106.0);
        assert!(!close(a, b, DEFAULT_TOLERANCE));
    }
}
