//! Per-frame landmark snapshot
//!
//! A snapshot maps every landmark to an optional pixel coordinate. An empty
//! snapshot means the pose engine found no body in the frame. A body that was
//! detected with every landmark below the visibility cutoff still counts as
//! present, it just has no usable coordinates.

use serde::{Deserialize, Serialize};

use super::id::LandmarkId;

/// Integer pixel coordinate; `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Capture resolution used to scale normalized coordinates to pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// A landmark as emitted by the pose engine, in normalized image space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedLandmark {
    pub id: LandmarkId,
    /// Horizontal position, 0.0 = left edge, 1.0 = right edge
    pub x: f32,
    /// Vertical position, 0.0 = top edge, 1.0 = bottom edge
    pub y: f32,
    /// Engine confidence that the landmark is visible
    pub visibility: f32,
}

/// Pixel coordinates of the landmarks detected in one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkSnapshot {
    points: [Option<Point>; LandmarkId::COUNT],
    body_detected: bool,
}

impl Default for LandmarkSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSnapshot {
    /// Snapshot with no body detected
    pub fn new() -> Self {
        Self {
            points: [None; LandmarkId::COUNT],
            body_detected: false,
        }
    }

    /// Snapshot of a detected body with no usable coordinates
    pub fn body_only() -> Self {
        Self {
            body_detected: true,
            ..Self::new()
        }
    }

    /// Builder-style insert
    pub fn with(mut self, id: LandmarkId, point: Point) -> Self {
        self.insert(id, point);
        self
    }

    pub fn insert(&mut self, id: LandmarkId, point: Point) {
        self.points[id.index()] = Some(point);
        self.body_detected = true;
    }

    pub fn get(&self, id: LandmarkId) -> Option<Point> {
        self.points[id.index()]
    }

    /// True when the pose engine found a body, whatever its visibility
    pub fn body_detected(&self) -> bool {
        self.body_detected
    }

    /// True when no landmark has a usable coordinate
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Option::is_none)
    }

    /// Number of landmarks with a coordinate
    pub fn len(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Convert normalized engine output to pixel coordinates.
    ///
    /// Coordinates are scaled by the frame size and truncated toward zero.
    /// Landmarks below `min_visibility`, or with non-finite coordinates, are
    /// left absent, but any landmark at all marks the body as detected.
    pub fn from_normalized<I>(landmarks: I, frame: FrameSize, min_visibility: f32) -> Self
    where
        I: IntoIterator<Item = NormalizedLandmark>,
    {
        let width = frame.width as f32;
        let height = frame.height as f32;

        let mut snapshot = Self::new();
        for landmark in landmarks {
            snapshot.body_detected = true;
            if !landmark.x.is_finite() || !landmark.y.is_finite() {
                continue;
            }
            if landmark.visibility < min_visibility {
                continue;
            }
            let point = Point::new((landmark.x * width) as i32, (landmark.y * height) as i32);
            snapshot.insert(landmark.id, point);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(id: LandmarkId, x: f32, y: f32, visibility: f32) -> NormalizedLandmark {
        NormalizedLandmark {
            id,
            x,
            y,
            visibility,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LandmarkSnapshot::new();
        assert!(snapshot.is_empty());
        assert!(!snapshot.body_detected());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.get(LandmarkId::Nose), None);
        assert_eq!(snapshot, LandmarkSnapshot::default());
    }

    #[test]
    fn test_insert_and_get() {
        let snapshot = LandmarkSnapshot::new().with(LandmarkId::LeftIndex, Point::new(10, 20));
        assert!(!snapshot.is_empty());
        assert!(snapshot.body_detected());
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(LandmarkId::LeftIndex), Some(Point::new(10, 20)));
        assert_eq!(snapshot.get(LandmarkId::RightIndex), None);
    }

    #[test]
    fn test_from_normalized_scales_and_truncates() {
        let snapshot = LandmarkSnapshot::from_normalized(
            [
                normalized(LandmarkId::LeftShoulder, 0.5, 0.5, 0.9),
                normalized(LandmarkId::RightShoulder, 0.2599, 0.7499, 1.0),
            ],
            FrameSize::default(),
            0.5,
        );

        assert_eq!(snapshot.get(LandmarkId::LeftShoulder), Some(Point::new(320, 240)));
        assert_eq!(snapshot.get(LandmarkId::RightShoulder), Some(Point::new(166, 359)));
    }

    #[test]
    fn test_from_normalized_drops_low_visibility() {
        let snapshot = LandmarkSnapshot::from_normalized(
            [
                normalized(LandmarkId::LeftWrist, 0.1, 0.1, 0.49),
                normalized(LandmarkId::RightWrist, 0.1, 0.1, 0.5),
                normalized(LandmarkId::Nose, f32::NAN, 0.1, 1.0),
            ],
            FrameSize::default(),
            0.5,
        );

        assert_eq!(snapshot.get(LandmarkId::LeftWrist), None);
        assert!(snapshot.get(LandmarkId::RightWrist).is_some());
        assert_eq!(snapshot.get(LandmarkId::Nose), None);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_low_visibility_body_is_still_detected() {
        let snapshot = LandmarkSnapshot::from_normalized(
            [
                normalized(LandmarkId::Nose, 0.5, 0.3, 0.3),
                normalized(LandmarkId::LeftShoulder, 0.4, 0.6, 0.4),
            ],
            FrameSize::default(),
            0.5,
        );

        assert!(snapshot.is_empty());
        assert!(snapshot.body_detected());
        assert_eq!(snapshot, LandmarkSnapshot::body_only());

        let nobody = LandmarkSnapshot::from_normalized(Vec::new(), FrameSize::default(), 0.5);
        assert!(!nobody.body_detected());
    }

    #[test]
    fn test_out_of_range_coordinates_saturate() {
        let snapshot = LandmarkSnapshot::from_normalized(
            [
                normalized(LandmarkId::LeftIndex, 1e8, 0.5, 1.0),
                normalized(LandmarkId::LeftEyeOuter, -1e8, 0.5, 1.0),
            ],
            FrameSize::default(),
            0.5,
        );

        assert_eq!(snapshot.get(LandmarkId::LeftIndex), Some(Point::new(i32::MAX, 240)));
        assert_eq!(snapshot.get(LandmarkId::LeftEyeOuter), Some(Point::new(i32::MIN, 240)));
    }
}
