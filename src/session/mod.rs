//! Detection session module
//!
//! A session owns one task state machine and decides when the run ends:
//! - Completed: the detector saw the whole action
//! - ManuallyConfirmed / Cancelled: the user overrode the detector
//! - TimedOut: the timeout elapsed first
//! - NoCamera: the frame source could not be opened, so no session ran

mod driver;
mod runner;

pub use driver::{DetectionOutcome, DetectionSession, ExternalSignal};
pub use runner::{SessionReport, SessionRunner};
