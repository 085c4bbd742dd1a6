//! Frame wire format
//!
//! One JSON object per line:
//!
//! ```json
//! {"t": 1.25, "landmarks": [{"id": "left_wrist", "x": 0.41, "y": 0.22, "visibility": 0.93}], "key": 32}
//! ```
//!
//! `t` is seconds since the stream started, coordinates are normalized to
//! the frame, and an empty `landmarks` array means nobody is in frame.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::keys::KeyPress;
use super::reader::FrameInput;
use crate::landmarks::{FrameSize, LandmarkId, LandmarkSnapshot, NormalizedLandmark};

/// One frame as produced by the pose engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Seconds since the start of the stream
    pub t: f64,

    #[serde(default)]
    pub landmarks: Vec<LandmarkRecord>,

    /// Key pressed during this frame, as a `waitKey() & 0xFF` code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<u8>,
}

/// One landmark in normalized image coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

/// Errors converting a record into a frame
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("invalid frame timestamp: {0}")]
    InvalidTimestamp(f64),
}

impl FrameRecord {
    /// Parse one line of the stream
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Convert to a frame input anchored at `base`.
    ///
    /// Unknown landmark names are skipped with a warning. A non-empty
    /// `landmarks` array always marks the body as detected.
    pub fn into_input(
        self,
        base: Instant,
        frame: FrameSize,
        min_visibility: f32,
    ) -> Result<FrameInput, RecordError> {
        let at = Duration::try_from_secs_f64(self.t)
            .ok()
            .and_then(|offset| base.checked_add(offset))
            .ok_or(RecordError::InvalidTimestamp(self.t))?;
        let body_detected = !self.landmarks.is_empty();

        let landmarks = self.landmarks.into_iter().filter_map(|record| {
            match record.id.parse::<LandmarkId>() {
                Ok(id) => Some(NormalizedLandmark {
                    id,
                    x: record.x,
                    y: record.y,
                    visibility: record.visibility,
                }),
                Err(e) => {
                    warn!(%e, "skipping landmark");
                    None
                }
            }
        });

        let mut snapshot = LandmarkSnapshot::from_normalized(landmarks, frame, min_visibility);
        if body_detected && !snapshot.body_detected() {
            snapshot = LandmarkSnapshot::body_only();
        }

        Ok(FrameInput {
            snapshot,
            at,
            signal: self.key.map(KeyPress).and_then(KeyPress::signal),
        })
    }
}
