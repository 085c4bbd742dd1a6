//! Landmark module for per-frame body keypoints
//!
//! Provides the BlazePose landmark topology, the per-frame snapshot of
//! pixel coordinates, and the small geometry helpers the detectors share.

mod geometry;
mod id;
mod snapshot;

pub use geometry::{all_present, distance};
pub use id::{LandmarkId, ParseLandmarkIdError};
pub use snapshot::{FrameSize, LandmarkSnapshot, NormalizedLandmark, Point};
