//! BlazePose landmark identifiers
//!
//! The 33-point topology emitted by BlazePose-style pose engines, in the
//! engine's canonical index order.

use std::str::FromStr;

/// Anatomical landmark identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LandmarkId {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkId {
    /// Number of landmarks in the topology
    pub const COUNT: usize = 33;

    /// Every landmark, indexed by its position in the engine output
    pub const ALL: [LandmarkId; Self::COUNT] = [
        LandmarkId::Nose,
        LandmarkId::LeftEyeInner,
        LandmarkId::LeftEye,
        LandmarkId::LeftEyeOuter,
        LandmarkId::RightEyeInner,
        LandmarkId::RightEye,
        LandmarkId::RightEyeOuter,
        LandmarkId::LeftEar,
        LandmarkId::RightEar,
        LandmarkId::MouthLeft,
        LandmarkId::MouthRight,
        LandmarkId::LeftShoulder,
        LandmarkId::RightShoulder,
        LandmarkId::LeftElbow,
        LandmarkId::RightElbow,
        LandmarkId::LeftWrist,
        LandmarkId::RightWrist,
        LandmarkId::LeftPinky,
        LandmarkId::RightPinky,
        LandmarkId::LeftIndex,
        LandmarkId::RightIndex,
        LandmarkId::LeftThumb,
        LandmarkId::RightThumb,
        LandmarkId::LeftHip,
        LandmarkId::RightHip,
        LandmarkId::LeftKnee,
        LandmarkId::RightKnee,
        LandmarkId::LeftAnkle,
        LandmarkId::RightAnkle,
        LandmarkId::LeftHeel,
        LandmarkId::RightHeel,
        LandmarkId::LeftFootIndex,
        LandmarkId::RightFootIndex,
    ];

    /// Position of this landmark in the engine output
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name used on the wire
    pub fn name(self) -> &'static str {
        match self {
            LandmarkId::Nose => "nose",
            LandmarkId::LeftEyeInner => "left_eye_inner",
            LandmarkId::LeftEye => "left_eye",
            LandmarkId::LeftEyeOuter => "left_eye_outer",
            LandmarkId::RightEyeInner => "right_eye_inner",
            LandmarkId::RightEye => "right_eye",
            LandmarkId::RightEyeOuter => "right_eye_outer",
            LandmarkId::LeftEar => "left_ear",
            LandmarkId::RightEar => "right_ear",
            LandmarkId::MouthLeft => "mouth_left",
            LandmarkId::MouthRight => "mouth_right",
            LandmarkId::LeftShoulder => "left_shoulder",
            LandmarkId::RightShoulder => "right_shoulder",
            LandmarkId::LeftElbow => "left_elbow",
            LandmarkId::RightElbow => "right_elbow",
            LandmarkId::LeftWrist => "left_wrist",
            LandmarkId::RightWrist => "right_wrist",
            LandmarkId::LeftPinky => "left_pinky",
            LandmarkId::RightPinky => "right_pinky",
            LandmarkId::LeftIndex => "left_index",
            LandmarkId::RightIndex => "right_index",
            LandmarkId::LeftThumb => "left_thumb",
            LandmarkId::RightThumb => "right_thumb",
            LandmarkId::LeftHip => "left_hip",
            LandmarkId::RightHip => "right_hip",
            LandmarkId::LeftKnee => "left_knee",
            LandmarkId::RightKnee => "right_knee",
            LandmarkId::LeftAnkle => "left_ankle",
            LandmarkId::RightAnkle => "right_ankle",
            LandmarkId::LeftHeel => "left_heel",
            LandmarkId::RightHeel => "right_heel",
            LandmarkId::LeftFootIndex => "left_foot_index",
            LandmarkId::RightFootIndex => "right_foot_index",
        }
    }
}

impl std::fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a landmark name is not part of the topology
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown landmark: {0}")]
pub struct ParseLandmarkIdError(pub String);

impl FromStr for LandmarkId {
    type Err = ParseLandmarkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| ParseLandmarkIdError(s.to_string()))
    }
}
