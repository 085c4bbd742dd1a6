//! Pixel-space geometry helpers

use super::id::LandmarkId;
use super::snapshot::{LandmarkSnapshot, Point};

/// Euclidean distance between two pixel coordinates
///
/// Computed in `f64` so saturated coordinates cannot overflow.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    dx.hypot(dy)
}

/// True iff every landmark in `ids` has a coordinate in `snapshot`
pub fn all_present(snapshot: &LandmarkSnapshot, ids: &[LandmarkId]) -> bool {
    ids.iter().all(|&id| snapshot.get(id).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        assert_eq!(distance(Point::new(0, 0), Point::new(3, 4)), 5.0);
        assert_eq!(distance(Point::new(10, 10), Point::new(10, 10)), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(120, 80);
        let b = Point::new(-40, 300);
        assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_distance_across_full_i32_range() {
        let a = Point::new(i32::MAX, 0);
        let b = Point::new(i32::MIN, 0);
        assert_eq!(distance(a, b), f64::from(i32::MAX) - f64::from(i32::MIN));

        let c = Point::new(0, i32::MIN);
        assert!(distance(a, c).is_finite());
    }

    #[test]
    fn test_all_present() {
        let snapshot = LandmarkSnapshot::new()
            .with(LandmarkId::LeftWrist, Point::new(1, 2))
            .with(LandmarkId::RightWrist, Point::new(3, 4));

        assert!(all_present(
            &snapshot,
            &[LandmarkId::LeftWrist, LandmarkId::RightWrist]
        ));
        assert!(!all_present(
            &snapshot,
            &[LandmarkId::LeftWrist, LandmarkId::LeftShoulder]
        ));
        // Vacuously true for an empty requirement list
        assert!(all_present(&LandmarkSnapshot::new(), &[]));
    }
}
