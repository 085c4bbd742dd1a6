//! Leave-seat detection
//!
//! Here a frame without a body is the signal itself: the seat must stay empty
//! for the whole absence window. A single frame with a body in it restarts
//! the count, even when none of its landmarks passed the visibility cutoff.

use std::time::Instant;

use tracing::debug;

use super::{Detector, Thresholds, Verdict};
use crate::landmarks::LandmarkSnapshot;

const STATUS_PRESENT: &str = "user detected";
const STATUS_STARTED: &str = "detecting...";
const STATUS_FINISHED: &str = "finished";

/// Leave-seat progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveSeatState {
    /// Someone is in frame
    Present,
    /// Nobody is in frame
    Absent {
        /// Start of the current absence; `None` until the timer is armed
        since: Option<Instant>,
    },
}

impl LeaveSeatState {
    pub fn name(&self) -> &'static str {
        match self {
            LeaveSeatState::Present => "present",
            LeaveSeatState::Absent { .. } => "absent",
        }
    }
}

/// Compute the next state for one frame
pub fn transition(
    state: LeaveSeatState,
    snapshot: &LandmarkSnapshot,
    now: Instant,
    thresholds: &Thresholds,
) -> (LeaveSeatState, Verdict) {
    if snapshot.body_detected() {
        return (LeaveSeatState::Present, Verdict::running(STATUS_PRESENT));
    }

    match state {
        LeaveSeatState::Present | LeaveSeatState::Absent { since: None } => (
            LeaveSeatState::Absent { since: Some(now) },
            Verdict::running(STATUS_STARTED),
        ),
        LeaveSeatState::Absent { since: Some(since) } => {
            let elapsed = now.saturating_duration_since(since);
            if elapsed.as_secs_f64() > thresholds.absence_secs {
                (state, Verdict::completed(STATUS_FINISHED))
            } else {
                (
                    state,
                    Verdict::running(format!(
                        "left for {}/{}s",
                        elapsed.as_secs(),
                        thresholds.absence_secs
                    )),
                )
            }
        }
    }
}

/// Stateful wrapper around [`transition`]
#[derive(Debug, Clone)]
pub struct LeaveSeatDetector {
    state: LeaveSeatState,
    thresholds: Thresholds,
}

impl LeaveSeatDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            state: LeaveSeatState::Present,
            thresholds,
        }
    }

    pub fn state(&self) -> LeaveSeatState {
        self.state
    }
}

impl Detector for LeaveSeatDetector {
    fn evaluate(&mut self, snapshot: &LandmarkSnapshot, now: Instant) -> Verdict {
        let (next, verdict) = transition(self.state, snapshot, now, &self.thresholds);
        if next.name() != self.state.name() {
            debug!(from = self.state.name(), to = next.name(), "leave_seat transition");
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
    use crate::detect::fixtures::{at, torso_only};

    fn detector() -> LeaveSeatDetector {
        LeaveSeatDetector::new(Thresholds::default())
    }

    #[test]
    fn test_body_present() {
        let mut d = detector();
        let v = d.evaluate(&torso_only(), Instant::now());
        assert_eq!(d.state(), LeaveSeatState::Present);
        assert_eq!(v.status, "user detected");
        assert!(!v.completed);
    }

    #[test]
    fn test_absence_completes_after_window() {
        let t0 = Instant::now();
        let empty = LandmarkSnapshot::new();
        let mut d = detector();

        let v = d.evaluate(&empty, t0);
        assert_eq!(v.status, "detecting...");
        assert_eq!(d.state(), LeaveSeatState::Absent { since: Some(t0) });

        let v = d.evaluate(&empty, at(t0, 2.7));
        assert_eq!(v.status, "left for 2/5s");
        assert!(!v.completed);

        let v = d.evaluate(&empty, at(t0, 5.0));
        assert_eq!(v.status, "left for 5/5s");
        assert!(!v.completed);

        let v = d.evaluate(&empty, at(t0, 5.1));
        assert!(v.completed);
        assert_eq!(v.status, "finished");
    }

    #[test]
    fn test_presence_restarts_count() {
        let t0 = Instant::now();
        let empty = LandmarkSnapshot::new();
        let mut d = detector();

        d.evaluate(&empty, t0);
        d.evaluate(&empty, at(t0, 4.8));
        d.evaluate(&torso_only(), at(t0, 4.9));
        assert_eq!(d.state(), LeaveSeatState::Present);

        // 5.1s after the first absent frame, but only 0.1s into the new one
        let v = d.evaluate(&empty, at(t0, 5.0));
        assert_eq!(v.status, "detecting...");
        let v = d.evaluate(&empty, at(t0, 5.1));
        assert!(!v.completed);
        assert_eq!(v.status, "left for 0/5s");

        let v = d.evaluate(&empty, at(t0, 10.0));
        assert!(!v.completed);
        let v = d.evaluate(&empty, at(t0, 10.1));
        assert!(v.completed);
    }

    #[test]
    fn test_low_visibility_body_is_present() {
        let t0 = Instant::now();
        let mut d = detector();

        for i in 0..7 {
            let v = d.evaluate(&LandmarkSnapshot::body_only(), at(t0, i as f64));
            assert_eq!(d.state(), LeaveSeatState::Present);
            assert_eq!(v.status, "user detected");
            assert!(!v.completed);
        }
    }

    #[test]
    fn test_unarmed_timer_is_armed_on_first_absent_frame() {
        let t0 = Instant::now();
        let (state, v) = transition(
            LeaveSeatState::Absent { since: None },
            &LandmarkSnapshot::new(),
            t0,
            &Thresholds::default(),
        );
        assert_eq!(state, LeaveSeatState::Absent { since: Some(t0) });
        assert_eq!(v.status, "detecting...");
    }

    #[test]
    fn test_custom_window_in_status() {
        let t0 = Instant::now();
        let thresholds = Thresholds {
            absence_secs: 2.5,
            ..Thresholds::default()
        };
        let mut d = LeaveSeatDetector::new(thresholds);
        let empty = LandmarkSnapshot::new();

        d.evaluate(&empty, t0);
        let v = d.evaluate(&empty, at(t0, 1.2));
        assert_eq!(v.status, "left for 1/2.5s");
        let v = d.evaluate(&empty, at(t0, 2.6));
        assert!(v.completed);
    }
}
