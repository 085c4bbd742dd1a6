//! Rest-action detectors
//!
//! One small state machine per task:
//! - DrinkWater: hand held near the face, then taken away
//! - LeaveSeat: no body in frame for a sustained interval
//! - Stretch: both wrists held above the shoulders
//!
//! Every detector is a pure function of (state, snapshot, now); the
//! wrappers here only store the state between frames.

mod drink_water;
mod leave_seat;
mod machine;
mod stretch;
mod thresholds;

use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::landmarks::LandmarkSnapshot;

pub use drink_water::{DrinkWaterDetector, DrinkWaterState};
pub use leave_seat::{LeaveSeatDetector, LeaveSeatState};
pub use machine::{TaskState, TaskStateMachine};
pub use stretch::{StretchDetector, StretchState};
pub use thresholds::Thresholds;

/// Status reported when a detector's required landmarks are not all visible
pub const STATUS_BODY_NOT_VISIBLE: &str = "upper body in screen";

/// The rest action a session is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    DrinkWater,
    LeaveSeat,
    Stretch,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::DrinkWater, TaskKind::LeaveSeat, TaskKind::Stretch];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::DrinkWater => "drink_water",
            TaskKind::LeaveSeat => "leave_seat",
            TaskKind::Stretch => "stretch",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a task name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task '{0}', expected one of: drink-water, leave-seat, stretch")]
pub struct ParseTaskKindError(pub String);

impl FromStr for TaskKind {
    type Err = ParseTaskKindError;

    /// Accepts both `drink_water` and `drink-water` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TaskKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseTaskKindError(s.to_string()))
    }
}

/// Result of evaluating one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The action has been fully performed
    pub completed: bool,
    /// Human-readable progress for display
    pub status: String,
}

impl Verdict {
    pub fn running(status: impl Into<String>) -> Self {
        Self {
            completed: false,
            status: status.into(),
        }
    }

    pub fn completed(status: impl Into<String>) -> Self {
        Self {
            completed: true,
            status: status.into(),
        }
    }
}

/// Common interface of the per-task state machines
pub trait Detector {
    /// Consume one frame and report progress
    fn evaluate(&mut self, snapshot: &LandmarkSnapshot, now: Instant) -> Verdict;

    /// Name of the current state, for logs and events
    fn phase(&self) -> &'static str;
}

/// Seconds between `since` and `now`, zero if the clock went backwards
pub(crate) fn elapsed_secs(since: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(since).as_secs_f64()
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Snapshot builders shared by the detector tests

    use std::time::{Duration, Instant};

    use crate::landmarks::{LandmarkId, LandmarkSnapshot, Point};

    /// `t0 + secs`
    pub fn at(t0: Instant, secs: f64) -> Instant {
        t0 + Duration::from_secs_f64(secs)
    }

    /// Both hands `dist` pixels straight below the matching outer eye corner
    pub fn hands_at_distance(dist: i32) -> LandmarkSnapshot {
        LandmarkSnapshot::new()
            .with(LandmarkId::LeftEyeOuter, Point::new(300, 200))
            .with(LandmarkId::RightEyeOuter, Point::new(340, 200))
            .with(LandmarkId::LeftIndex, Point::new(300, 200 + dist))
            .with(LandmarkId::RightIndex, Point::new(340, 200 + dist))
    }

    /// Shoulders at y = 300 with both wrists `lift` pixels above them
    pub fn arms(left_lift: i32, right_lift: i32) -> LandmarkSnapshot {
        LandmarkSnapshot::new()
            .with(LandmarkId::LeftShoulder, Point::new(250, 300))
            .with(LandmarkId::RightShoulder, Point::new(390, 300))
            .with(LandmarkId::LeftWrist, Point::new(240, 300 - left_lift))
            .with(LandmarkId::RightWrist, Point::new(400, 300 - right_lift))
    }

    /// A body is in frame but none of the detector landmarks are
    pub fn torso_only() -> LandmarkSnapshot {
        LandmarkSnapshot::new()
            .with(LandmarkId::LeftHip, Point::new(260, 460))
            .with(LandmarkId::RightHip, Point::new(380, 460))
    }
}
