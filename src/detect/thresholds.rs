//! Detector tuning constants
//!
//! All distances are raw pixels and only hold at a fixed capture resolution
//! and camera distance.

use serde::{Deserialize, Serialize};

/// Pixel and timing thresholds shared by the detectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Hand-to-eye distance below which the hand counts as at the mouth
    pub near_px: f64,
    /// Hand-to-eye distance above which the hand counts as taken away
    pub far_px: f64,
    /// How long the hand must stay near the mouth
    pub drink_hold_secs: f64,
    /// How long the seat must stay empty
    pub absence_secs: f64,
    /// How far above the shoulder a wrist must be to count as raised
    pub raise_margin_px: i32,
    /// How long both arms must stay raised
    pub stretch_hold_secs: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            near_px: 50.0,
            far_px: 80.0,
            drink_hold_secs: 2.0,
            absence_secs: 5.0,
            raise_margin_px: 50,
            stretch_hold_secs: 1.5,
        }
    }
}
