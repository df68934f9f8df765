//! Landmark types
//!
//! Named pose points as delivered by the pose estimator.
//! MediaPipe Pose ordering (33 points) is the canonical index layout.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::PoseError;

/// Number of landmarks in a MediaPipe Pose observation
pub const POSE_LANDMARK_COUNT: usize = 33;

// ============================================================================
// LANDMARK NAMES (MediaPipe Pose - 33 total)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkName {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkName {
    /// All names in MediaPipe index order
    pub const ALL: [LandmarkName; POSE_LANDMARK_COUNT] = [
        Self::Nose,
        Self::LeftEyeInner, Self::LeftEye, Self::LeftEyeOuter,
        Self::RightEyeInner, Self::RightEye, Self::RightEyeOuter,
        Self::LeftEar, Self::RightEar,
        Self::MouthLeft, Self::MouthRight,
        Self::LeftShoulder, Self::RightShoulder,
        Self::LeftElbow, Self::RightElbow,
        Self::LeftWrist, Self::RightWrist,
        Self::LeftPinky, Self::RightPinky,
        Self::LeftIndex, Self::RightIndex,
        Self::LeftThumb, Self::RightThumb,
        Self::LeftHip, Self::RightHip,
        Self::LeftKnee, Self::RightKnee,
        Self::LeftAnkle, Self::RightAnkle,
        Self::LeftHeel, Self::RightHeel,
        Self::LeftFootIndex, Self::RightFootIndex,
    ];

    /// MediaPipe index of this landmark
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single pose point (normalized image coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth, unused by the 2D angle math
    #[serde(default)]
    pub z: f32,
    /// Estimator confidence that the point is visible
    #[validate(range(min = 0.0, max = 1.0))]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, z: 0.0, visibility }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }
}

/// One pose observation: landmark name -> point
///
/// Created per frame and dropped after angle extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: HashMap<LandmarkName, Landmark>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a MediaPipe-ordered array of exactly 33 points
    pub fn from_mediapipe(points: &[Landmark]) -> Result<Self, PoseError> {
        if points.len() != POSE_LANDMARK_COUNT {
            return Err(PoseError::PointCount {
                expected: POSE_LANDMARK_COUNT,
                actual: points.len(),
            });
        }

        Ok(LandmarkName::ALL
            .iter()
            .zip(points)
            .map(|(name, lm)| (*name, *lm))
            .collect())
    }

    pub fn insert(&mut self, name: LandmarkName, landmark: Landmark) -> Option<Landmark> {
        self.points.insert(name, landmark)
    }

    pub fn with(mut self, name: LandmarkName, landmark: Landmark) -> Self {
        self.points.insert(name, landmark);
        self
    }

    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.points.get(&name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LandmarkName, &Landmark)> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(LandmarkName, Landmark)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (LandmarkName, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
