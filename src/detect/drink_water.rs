//! Drink-water detection
//!
//! The hand has to come up to the face, stay there for the hold time, then
//! move clearly away. The near/far thresholds form a hysteresis band so a
//! hand hovering between them neither completes nor resets the action.

use std::time::Instant;

use tracing::debug;

use super::{elapsed_secs, Detector, Thresholds, Verdict, STATUS_BODY_NOT_VISIBLE};
use crate::landmarks::{all_present, distance, LandmarkId, LandmarkSnapshot};

const REQUIRED: [LandmarkId; 4] = [
    LandmarkId::LeftIndex,
    LandmarkId::RightIndex,
    LandmarkId::LeftEyeOuter,
    LandmarkId::RightEyeOuter,
];

const STATUS_WAITING: &str = "bring your hand to your mouth";
const STATUS_NEAR: &str = "hand near mouth...";
const STATUS_REMOVE: &str = "remove your hand...";
const STATUS_FINISHED: &str = "finished!";

/// Drink-water progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrinkWaterState {
    /// Waiting for a hand to reach the face
    Initial,
    /// A hand is at the face
    HandNearMouth {
        /// When the hand arrived
        entered_at: Instant,
    },
    /// Held long enough; waiting for the hand to leave
    HandAway,
}

impl DrinkWaterState {
    pub fn name(&self) -> &'static str {
        match self {
            DrinkWaterState::Initial => "initial",
            DrinkWaterState::HandNearMouth { .. } => "hand_near_mouth",
            DrinkWaterState::HandAway => "hand_away",
        }
    }
}

/// Shorter of the two index-finger to outer-eye-corner distances.
///
/// `None` when any of the four landmarks is missing.
fn hand_to_eye_distance(snapshot: &LandmarkSnapshot) -> Option<f64> {
    if !all_present(snapshot, &REQUIRED) {
        return None;
    }
    let left = distance(
        snapshot.get(LandmarkId::LeftIndex)?,
        snapshot.get(LandmarkId::LeftEyeOuter)?,
    );
    let right = distance(
        snapshot.get(LandmarkId::RightIndex)?,
        snapshot.get(LandmarkId::RightEyeOuter)?,
    );
    Some(left.min(right))
}

/// Compute the next state for one frame
pub fn transition(
    state: DrinkWaterState,
    snapshot: &LandmarkSnapshot,
    now: Instant,
    thresholds: &Thresholds,
) -> (DrinkWaterState, Verdict) {
    // Occlusion keeps the current state
    let Some(min_dist) = hand_to_eye_distance(snapshot) else {
        return (state, Verdict::running(STATUS_BODY_NOT_VISIBLE));
    };

    let near = min_dist < thresholds.near_px;

    match state {
        DrinkWaterState::Initial => {
            if near {
                (
                    DrinkWaterState::HandNearMouth { entered_at: now },
                    Verdict::running(STATUS_NEAR),
                )
            } else {
                (state, Verdict::running(STATUS_WAITING))
            }
        }
        DrinkWaterState::HandNearMouth { entered_at } => {
            if !near {
                (DrinkWaterState::Initial, Verdict::running(STATUS_WAITING))
            } else if elapsed_secs(entered_at, now) > thresholds.drink_hold_secs {
                (DrinkWaterState::HandAway, Verdict::running(STATUS_REMOVE))
            } else {
                (state, Verdict::running(STATUS_NEAR))
            }
        }
        DrinkWaterState::HandAway => {
            if min_dist > thresholds.far_px {
                (state, Verdict::completed(STATUS_FINISHED))
            } else {
                (state, Verdict::running(STATUS_REMOVE))
            }
        }
    }
}

/// Stateful wrapper around [`transition`]
#[derive(Debug, Clone)]
pub struct DrinkWaterDetector {
    state: DrinkWaterState,
    thresholds: Thresholds,
}

impl DrinkWaterDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            state: DrinkWaterState::Initial,
            thresholds,
        }
    }

    pub fn state(&self) -> DrinkWaterState {
        self.state
    }
}

impl Detector for DrinkWaterDetector {
    fn evaluate(&mut self, snapshot: &LandmarkSnapshot, now: Instant) -> Verdict {
        let (next, verdict) = transition(self.state, snapshot, now, &self.thresholds);
        if next.name() != self.state.name() {
            debug!(from = self.state.name(), to = next.name(), "drink_water transition");
        }
        self.state = next;
        verdict
    }

    fn phase(&self) -> &'static str {
        self.state.name()
    }
}
