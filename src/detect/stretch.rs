//! Stretch detection: both wrists held above the shoulders

use std::time::Instant;

use tracing::debug;

use super::{elapsed_secs, Detector, Thresholds, Verdict, STATUS_BODY_NOT_VISIBLE};
use crate::landmarks::{all_present, LandmarkId, LandmarkSnapshot, Point};

const REQUIRED: [LandmarkId; 4] = [
    LandmarkId::LeftShoulder,
    LandmarkId::RightShoulder,
    LandmarkId::LeftWrist,
    LandmarkId::RightWrist,
];

const STATUS_WAITING: &str = "raise both arms above your shoulders";
const STATUS_HOLD: &str = "hold your arm";
const STATUS_FINISHED: &str = "finished";

/// Stretch progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StretchState {
    /// Waiting for both arms to go up
    Initial,
    /// Both arms are up
    ArmsUp {
        /// When both arms went up
        entered_at: Instant,
    },
}

impl StretchState {
    pub fn name(&self) -> &'static str {
        match self {
            StretchState::Initial => "initial",
            StretchState::ArmsUp { .. } => "arms_up",
        }
    }
}

/// Image y grows downwards, so "above" means a smaller y
fn raised(wrist: Point, shoulder: Point, margin_px: i32) -> bool {
    i64::from(wrist.y) < i64::from(shoulder.y) - i64::from(margin_px)
}

fn both_arms_raised(snapshot: &LandmarkSnapshot, margin_px: i32) -> Option<bool> {
    if !all_present(snapshot, &REQUIRED) {
        return None;
    }
    let left = raised(
        snapshot.get(LandmarkId::LeftWrist)?,
        snapshot.get(LandmarkId::LeftShoulder)?,
        margin_px,
    );
    let right = raised(
        snapshot.get(LandmarkId::RightWrist)?,
        snapshot.get(LandmarkId::RightShoulder)?,
        margin_px,
    );
    Some(left && right)
}

/// Compute the next state for one frame
pub fn transition(
    state: StretchState,
    snapshot: &LandmarkSnapshot,
    now: Instant,
    thresholds: &Thresholds,
) -> (StretchState, Verdict) {
    let Some(arms_up) = both_arms_raised(snapshot, thresholds.raise_margin_px) else {
        return (state, Verdict::running(STATUS_BODY_NOT_VISIBLE));
    };

    match state {
        StretchState::Initial if arms_up => (
            StretchState::ArmsUp { entered_at: now },
            Verdict::running(STATUS_HOLD),
        ),
        StretchState::Initial => (state, Verdict::running(STATUS_WAITING)),
        StretchState::ArmsUp { .. } if !arms_up => {
            (StretchState::Initial, Verdict::running(STATUS_WAITING))
        }
        StretchState::ArmsUp { entered_at } => {
            if elapsed_secs(entered_at, now) > thresholds.stretch_hold_secs {
                (state, Verdict::completed(STATUS_FINISHED))
            } else {
                (state, Verdict::running(STATUS_HOLD))
            }
        }
    }
}

/// Stateful wrapper around [`transition`]
#[derive(Debug, Clone)]
pub struct StretchDetector {
    state: StretchState,
    thresholds: Thresholds,
}

impl StretchDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            state: StretchState::Initial,
            thresholds,
        }
    }

    pub fn state(&self) -> StretchState {
        self.state
    }
}

impl Detector for StretchDetector {
    fn evaluate(&mut self, snapshot: &LandmarkSnapshot, now: Instant) -> Verdict {
        let (next, verdict) = transition(self.state, snapshot, now, &self.thresholds);
        if next.name() != self.state.name() {
            debug!(from = self.state.name(), to = next.name(), "stretch transition");
        }
        self.state = next;
        verdict
    }

    fn phase(&self) -> &'static str {
        self.state.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::fixtures::{arms, at, torso_only};

    fn detector() -> StretchDetector {
        StretchDetector::new(Thresholds::default())
    }

    #[test]
    fn test_hold_completes() {
        let t0 = Instant::now();
        let mut d = detector();

        let v = d.evaluate(&arms(120, 120), t0);
        assert_eq!(d.state(), StretchState::ArmsUp { entered_at: t0 });
        assert_eq!(v.status, "hold your arm");

        let v = d.evaluate(&arms(120, 120), at(t0, 1.0));
        assert!(!v.completed);
        assert_eq!(v.status, "hold your arm");

        let v = d.evaluate(&arms(120, 120), at(t0, 1.6));
        assert!(v.completed);
        assert_eq!(v.status, "finished");
    }

    #[test]
    fn test_lowering_resets() {
        let t0 = Instant::now();
        let mut d = detector();

        d.evaluate(&arms(120, 120), t0);
        d.evaluate(&arms(120, 120), at(t0, 1.2));
        let v = d.evaluate(&arms(120, 10), at(t0, 1.3));
        assert_eq!(d.state(), StretchState::Initial);
        assert!(!v.completed);

        // Raising again restarts the hold timer
        d.evaluate(&arms(120, 120), at(t0, 1.4));
        let v = d.evaluate(&arms(120, 120), at(t0, 2.0));
        assert!(!v.completed);
        assert_eq!(d.state(), StretchState::ArmsUp { entered_at: at(t0, 1.4) });
    }

    #[test]
    fn test_one_arm_is_not_enough() {
        let mut d = detector();
        let v = d.evaluate(&arms(120, 0), Instant::now());
        assert_eq!(d.state(), StretchState::Initial);
        assert_eq!(v.status, "raise both arms above your shoulders");
    }

    #[test]
    fn test_extreme_coordinates() {
        let shoulders_low = LandmarkSnapshot::new()
            .with(LandmarkId::LeftShoulder, Point::new(250, i32::MAX))
            .with(LandmarkId::RightShoulder, Point::new(390, i32::MAX))
            .with(LandmarkId::LeftWrist, Point::new(240, i32::MIN))
            .with(LandmarkId::RightWrist, Point::new(400, i32::MIN));
        let mut d = detector();
        d.evaluate(&shoulders_low, Instant::now());
        assert_eq!(d.phase(), "arms_up");

        let shoulders_high = LandmarkSnapshot::new()
            .with(LandmarkId::LeftShoulder, Point::new(250, i32::MIN))
            .with(LandmarkId::RightShoulder, Point::new(390, i32::MIN))
            .with(LandmarkId::LeftWrist, Point::new(240, i32::MIN))
            .with(LandmarkId::RightWrist, Point::new(400, i32::MIN));
        let mut d = detector();
        d.evaluate(&shoulders_high, Instant::now());
        assert_eq!(d.phase(), "initial");
    }

    #[test]
    fn test_margin_is_strict() {
        let mut d = detector();
        // Wrist exactly at shoulder.y - 50 is not raised
        d.evaluate(&arms(50, 50), Instant::now());
        assert_eq!(d.state(), StretchState::Initial);

        d.evaluate(&arms(51, 51), Instant::now());
        assert_eq!(d.phase(), "arms_up");
    }

    #[test]
    fn test_missing_landmarks_preserve_state() {
        let t0 = Instant::now();
        let mut d = detector();
        d.evaluate(&arms(120, 120), t0);

        let v = d.evaluate(&torso_only(), at(t0, 0.5));
        assert_eq!(v.status, STATUS_BODY_NOT_VISIBLE);
        assert_eq!(d.state(), StretchState::ArmsUp { entered_at: t0 });

        let v = d.evaluate(&arms(120, 120), at(t0, 1.6));
        assert!(v.completed);
    }
}
