//! Frame-at-a-time session driver
//!
//! Applies user overrides and the timeout around the active task machine.
//! Evaluation never blocks, so overrides are checked once per frame.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::detect::{Detector, TaskKind, TaskState, TaskStateMachine, Thresholds};
use crate::landmarks::LandmarkSnapshot;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOutcome {
    /// The detector observed the full action
    Completed,
    /// The user confirmed completion by hand
    ManuallyConfirmed,
    /// The timeout elapsed without completion
    TimedOut,
    /// The user, or the frame source, stopped the session
    Cancelled,
    /// The frame source could not be opened
    NoCamera,
}

impl DetectionOutcome {
    /// Whether the rest action counts as done
    pub fn is_success(self) -> bool {
        matches!(
            self,
            DetectionOutcome::Completed | DetectionOutcome::ManuallyConfirmed
        )
    }
}

impl std::fmt::Display for DetectionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionOutcome::Completed => write!(f, "Completed"),
            DetectionOutcome::ManuallyConfirmed => write!(f, "ManuallyConfirmed"),
            DetectionOutcome::TimedOut => write!(f, "TimedOut"),
            DetectionOutcome::Cancelled => write!(f, "Cancelled"),
            DetectionOutcome::NoCamera => write!(f, "NoCamera"),
        }
    }
}

/// User override delivered alongside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalSignal {
    /// Treat the action as done
    ManualConfirm,
    /// Abandon the session
    Cancel,
}

/// One detection run for a single task
#[derive(Debug)]
pub struct DetectionSession {
    machine: TaskStateMachine,
    started_at: Instant,
    timeout: Duration,
    status: String,
    /// Timestamp of the last evaluated frame
    last_frame_at: Option<Instant>,
    /// Set once; every later frame returns it unchanged
    outcome: Option<DetectionOutcome>,
}

impl DetectionSession {
    /// Start a session for `kind` with its machine in the initial state
    pub fn start(kind: TaskKind, timeout: Duration, thresholds: Thresholds, now: Instant) -> Self {
        info!(task = %kind, timeout_secs = timeout.as_secs_f64(), "detection session started");

        Self {
            machine: TaskStateMachine::new(kind, thresholds),
            started_at: now,
            timeout,
            status: format!("detecting {}...", kind),
            last_frame_at: None,
            outcome: None,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.machine.kind()
    }

    pub fn state(&self) -> TaskState {
        self.machine.state()
    }

    /// Name of the active machine's current state
    pub fn phase(&self) -> &'static str {
        self.machine.phase()
    }

    /// Latest human-readable status
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Terminal outcome, once there is one
    pub fn outcome(&self) -> Option<DetectionOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Time covered by the frames seen so far
    pub fn elapsed(&self) -> Duration {
        self.last_frame_at
            .map(|t| t.saturating_duration_since(self.started_at))
            .unwrap_or(Duration::ZERO)
    }

    /// Feed one frame.
    ///
    /// Returns the terminal outcome once the session has ended, `None` while
    /// it is still running.
    pub fn on_frame(
        &mut self,
        snapshot: &LandmarkSnapshot,
        now: Instant,
        signal: Option<ExternalSignal>,
    ) -> Option<DetectionOutcome> {
        if let Some(outcome) = self.outcome {
            return Some(outcome);
        }

        // Overrides still apply to a late frame, but it never moves the clock back
        let behind = self
            .last_frame_at
            .and_then(|last| last.checked_duration_since(now))
            .filter(|behind| !behind.is_zero());
        if behind.is_none() {
            self.last_frame_at = Some(now);
        }

        match signal {
            Some(ExternalSignal::Cancel) => {
                return Some(self.finish(DetectionOutcome::Cancelled, Some("cancelled")));
            }
            Some(ExternalSignal::ManualConfirm) => {
                return Some(self.finish(DetectionOutcome::ManuallyConfirmed, Some("confirmed!")));
            }
            None => {}
        }

        if let Some(behind) = behind {
            warn!(
                behind_ms = behind.as_millis() as u64,
                "dropping out-of-order frame"
            );
            return None;
        }

        let verdict = self.machine.evaluate(snapshot, now);
        if verdict.status != self.status {
            debug!(status = %verdict.status, phase = self.machine.phase(), "status changed");
        }
        self.status = verdict.status;

        if verdict.completed {
            return Some(self.finish(DetectionOutcome::Completed, None));
        }

        if now.saturating_duration_since(self.started_at) > self.timeout {
            // Keep the detector's last status for the caller
            return Some(self.finish(DetectionOutcome::TimedOut, None));
        }

        None
    }

    /// End the session without a frame, e.g. on a shutdown signal
    pub fn cancel(&mut self) -> DetectionOutcome {
        self.cancel_with("cancelled")
    }

    /// End the session as cancelled with a specific status
    pub fn cancel_with(&mut self, status: &str) -> DetectionOutcome {
        match self.outcome {
            Some(outcome) => outcome,
            None => self.finish(DetectionOutcome::Cancelled, Some(status)),
        }
    }

    fn finish(&mut self, outcome: DetectionOutcome, status: Option<&str>) -> DetectionOutcome {
        if let Some(status) = status {
            self.status = status.to_string();
        }
        self.outcome = Some(outcome);

        info!(
            task = %self.kind(),
            %outcome,
            status = %self.status,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "detection session finished"
        );

        outcome
    }
}
