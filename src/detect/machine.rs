//! Task state machine selection
//!
//! The variant is chosen once from the session's [`TaskKind`] and never
//! changes, so each task keeps its own timers.

use std::time::Instant;

use super::{
    Detector, DrinkWaterDetector, DrinkWaterState, LeaveSeatDetector, LeaveSeatState,
    StretchDetector, StretchState, TaskKind, Thresholds, Verdict,
};
use crate::landmarks::LandmarkSnapshot;

/// Snapshot of the active machine's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    DrinkWater(DrinkWaterState),
    LeaveSeat(LeaveSeatState),
    Stretch(StretchState),
}

/// The state machine for one task kind
#[derive(Debug, Clone)]
pub enum TaskStateMachine {
    DrinkWater(DrinkWaterDetector),
    LeaveSeat(LeaveSeatDetector),
    Stretch(StretchDetector),
}

impl TaskStateMachine {
    /// Create the machine for `kind` in its initial state
    pub fn new(kind: TaskKind, thresholds: Thresholds) -> Self {
        match kind {
            TaskKind::DrinkWater => Self::DrinkWater(DrinkWaterDetector::new(thresholds)),
            TaskKind::LeaveSeat => Self::LeaveSeat(LeaveSeatDetector::new(thresholds)),
            TaskKind::Stretch => Self::Stretch(StretchDetector::new(thresholds)),
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Self::DrinkWater(_) => TaskKind::DrinkWater,
            Self::LeaveSeat(_) => TaskKind::LeaveSeat,
            Self::Stretch(_) => TaskKind::Stretch,
        }
    }

    pub fn state(&self) -> TaskState {
        match self {
            Self::DrinkWater(d) => TaskState::DrinkWater(d.state()),
            Self::LeaveSeat(d) => TaskState::LeaveSeat(d.state()),
            Self::Stretch(d) => TaskState::Stretch(d.state()),
        }
    }

    fn detector(&self) -> &dyn Detector {
        match self {
            Self::DrinkWater(d) => d,
            Self::LeaveSeat(d) => d,
            Self::Stretch(d) => d,
        }
    }

    fn detector_mut(&mut self) -> &mut dyn Detector {
        match self {
            Self::DrinkWater(d) => d,
            Self::LeaveSeat(d) => d,
            Self::Stretch(d) => d,
        }
    }
}

impl Detector for TaskStateMachine {
    fn evaluate(&mut self, snapshot: &LandmarkSnapshot, now: Instant) -> Verdict {
        self.detector_mut().evaluate(snapshot, now)
    }

    fn phase(&self) -> &'static str {
        self.detector().phase()
    }
}
