//! Async session runner
//!
//! Pulls frames off the reader channel, feeds them to the session and
//! broadcasts progress events until the session ends.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use super::driver::{DetectionOutcome, DetectionSession};
use crate::detect::TaskKind;
use crate::events::DetectionEvent;
use crate::input::FrameInput;

/// Status used when frames stop arriving before the session ended
pub const STATUS_SOURCE_CLOSED: &str = "frame source closed";

/// Final result handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub task: TaskKind,
    pub outcome: DetectionOutcome,
    /// Last status text shown to the user
    pub status: String,
    pub elapsed_ms: u64,
}

impl SessionReport {
    /// Report for a session that never started because frames were unavailable
    pub fn no_camera(task: TaskKind, reason: impl Into<String>) -> Self {
        Self {
            task,
            outcome: DetectionOutcome::NoCamera,
            status: reason.into(),
            elapsed_ms: 0,
        }
    }
}

/// Drives a [`DetectionSession`] from a frame channel
pub struct SessionRunner {
    session: DetectionSession,
    event_tx: broadcast::Sender<DetectionEvent>,
}

impl SessionRunner {
    /// Wrap a freshly started session and announce it
    pub fn new(session: DetectionSession, event_tx: broadcast::Sender<DetectionEvent>) -> Self {
        let runner = Self { session, event_tx };
        runner.emit(DetectionEvent::SessionStarted {
            task: runner.session.kind(),
            timeout_secs: runner.session.timeout().as_secs(),
        });
        runner
    }

    pub fn session(&self) -> &DetectionSession {
        &self.session
    }

    /// Run until the session ends or the frame channel closes
    pub async fn run(&mut self, mut frame_rx: mpsc::Receiver<FrameInput>) -> SessionReport {
        info!(task = %self.session.kind(), "session runner started");

        while let Some(frame) = frame_rx.recv().await {
            if let Some(report) = self.handle_frame(frame) {
                return report;
            }
        }

        warn!("frame source closed before the session finished");
        self.session.cancel_with(STATUS_SOURCE_CLOSED);
        self.finish()
    }

    /// Stop the session early, e.g. on a shutdown signal
    pub fn cancel(&mut self) -> SessionReport {
        self.session.cancel();
        self.finish()
    }

    /// Feed one frame; returns the report once the session has ended
    fn handle_frame(&mut self, frame: FrameInput) -> Option<SessionReport> {
        let old_phase = self.session.phase();
        let old_status = self.session.status().to_string();

        let outcome = self
            .session
            .on_frame(&frame.snapshot, frame.at, frame.signal);

        let new_phase = self.session.phase();
        if new_phase != old_phase {
            self.emit(DetectionEvent::PhaseChanged {
                from: old_phase.to_string(),
                to: new_phase.to_string(),
            });
        }

        // Terminal status is carried by SessionFinished
        if outcome.is_none() && self.session.status() != old_status {
            self.emit(DetectionEvent::StatusChanged {
                status: self.session.status().to_string(),
                elapsed_ms: millis(self.session.elapsed()),
            });
        }

        outcome.map(|_| self.finish())
    }

    /// Build the report for a finished session and announce it
    fn finish(&self) -> SessionReport {
        let outcome = self
            .session
            .outcome()
            .unwrap_or(DetectionOutcome::Cancelled);
        let report = SessionReport {
            task: self.session.kind(),
            outcome,
            status: self.session.status().to_string(),
            elapsed_ms: millis(self.session.elapsed()),
        };

        self.emit(DetectionEvent::SessionFinished {
            outcome: report.outcome,
            status: report.status.clone(),
            elapsed_ms: report.elapsed_ms,
        });

        report
    }

    fn emit(&self, event: DetectionEvent) {
        debug!(%event, "emitting detection event");
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
