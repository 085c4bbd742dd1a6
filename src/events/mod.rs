//! Events module for detection progress
//!
//! Structured events emitted by the session runner so a display layer can
//! follow a session without polling it.

use serde::{Deserialize, Serialize};

use crate::detect::TaskKind;
use crate::session::DetectionOutcome;

/// Events emitted while a detection session runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectionEvent {
    /// A session began
    SessionStarted {
        task: TaskKind,
        timeout_secs: u64,
    },

    /// The task machine moved to another state
    PhaseChanged {
        from: String,
        to: String,
    },

    /// The status text changed
    StatusChanged {
        status: String,
        /// Time since session start, in milliseconds
        elapsed_ms: u64,
    },

    /// The session reached a terminal outcome
    SessionFinished {
        outcome: DetectionOutcome,
        status: String,
        /// Time since session start, in milliseconds
        elapsed_ms: u64,
    },
}

impl std::fmt::Display for DetectionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionEvent::SessionStarted { task, timeout_secs } => {
                write!(f, "SESSION_STARTED ({}, {}s)", task, timeout_secs)
            }
            DetectionEvent::PhaseChanged { from, to } => {
                write!(f, "PHASE_CHANGED ({} -> {})", from, to)
            }
            DetectionEvent::StatusChanged { status, elapsed_ms } => {
                write!(f, "STATUS_CHANGED ({}ms: {})", elapsed_ms, status)
            }
            DetectionEvent::SessionFinished {
                outcome,
                elapsed_ms,
                ..
            } => {
                write!(f, "SESSION_FINISHED ({}, {}ms)", outcome, elapsed_ms)
            }
        }
    }
}
