//! Key code definitions for user overrides
//!
//! Key codes follow the capture loop's `waitKey() & 0xFF` convention and
//! are mapped to session signals here.

use crate::session::ExternalSignal;

/// Key codes recognised as overrides
pub mod codes {
    /// Space bar: confirm the action by hand
    pub const SPACE: u8 = b' ';
    /// Escape: abandon the session
    pub const ESCAPE: u8 = 27;
}

/// A key pressed while a frame was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress(pub u8);

impl KeyPress {
    /// Session signal for this key, if it has one
    pub fn signal(self) -> Option<ExternalSignal> {
        if self.is_cancel() {
            Some(ExternalSignal::Cancel)
        } else if self.is_confirm() {
            Some(ExternalSignal::ManualConfirm)
        } else {
            None
        }
    }

    pub fn is_confirm(self) -> bool {
        self.0 == codes::SPACE
    }

    pub fn is_cancel(self) -> bool {
        self.0 == codes::ESCAPE
    }
}
