//! Angle extraction per exercise
//!
//! Each exercise reads one joint triple (left side) or two mirrored triples
//! (both sides, averaged). Visibility of every required landmark is checked
//! before any coordinate is used.

use serde::{Deserialize, Serialize};

use super::geometry::interior_angle;
use super::landmark::{LandmarkName, LandmarkSet};
use super::UnavailableInput;

use LandmarkName::*;

/// Default minimum visibility for a landmark to be trusted
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.6;

/// Three landmarks whose angle is measured at `vertex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointTriple {
    pub a: LandmarkName,
    pub vertex: LandmarkName,
    pub c: LandmarkName,
}

impl JointTriple {
    pub const fn new(a: LandmarkName, vertex: LandmarkName, c: LandmarkName) -> Self {
        Self { a, vertex, c }
    }

    pub fn landmarks(&self) -> [LandmarkName; 3] {
        [self.a, self.vertex, self.c]
    }
}

const LEFT_ELBOW_JOINT: JointTriple = JointTriple::new(LeftShoulder, LeftElbow, LeftWrist);
const RIGHT_ELBOW_JOINT: JointTriple = JointTriple::new(RightShoulder, RightElbow, RightWrist);
const LEFT_KNEE_JOINT: JointTriple = JointTriple::new(LeftHip, LeftKnee, LeftAnkle);
const RIGHT_KNEE_JOINT: JointTriple = JointTriple::new(RightHip, RightKnee, RightAnkle);
const LEFT_SHOULDER_JOINT: JointTriple = JointTriple::new(LeftHip, LeftShoulder, LeftElbow);

/// Maps a landmark set to the single angle an exercise is counted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleExtractor {
    /// Left elbow
    BicepCurl,
    /// Both elbows, averaged
    PushUp,
    /// Both knees, averaged
    Squat,
    /// Left shoulder abduction (hip-shoulder-elbow)
    LateralRaise,
    /// Left elbow
    ShoulderPress,
}

impl AngleExtractor {
    /// Joint triples this extractor measures; more than one are averaged
    pub fn joints(&self) -> &'static [JointTriple] {
        match self {
            AngleExtractor::BicepCurl => &[LEFT_ELBOW_JOINT],
            AngleExtractor::PushUp => &[LEFT_ELBOW_JOINT, RIGHT_ELBOW_JOINT],
            AngleExtractor::Squat => &[LEFT_KNEE_JOINT, RIGHT_KNEE_JOINT],
            AngleExtractor::LateralRaise => &[LEFT_SHOULDER_JOINT],
            AngleExtractor::ShoulderPress => &[LEFT_ELBOW_JOINT],
        }
    }

    pub fn is_bilateral(&self) -> bool {
        self.joints().len() > 1
    }

    pub fn required_landmarks(&self) -> Vec<LandmarkName> {
        let mut names: Vec<LandmarkName> = self
            .joints()
            .iter()
            .flat_map(|joint| joint.landmarks())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Extract the representative angle in degrees
    ///
    /// Fails if any required landmark is missing or below `min_visibility`.
    /// There is no single-side fallback for bilateral exercises.
    pub fn extract(&self, landmarks: &LandmarkSet, min_visibility: f32) -> Result<f32, UnavailableInput> {
        for name in self.required_landmarks() {
            let lm = landmarks.get(name).ok_or(UnavailableInput::Missing(name))?;
            if !lm.is_visible(min_visibility) {
                return Err(UnavailableInput::LowVisibility {
                    name,
                    visibility: lm.visibility,
                    threshold: min_visibility,
                });
            }
        }

        let joints = self.joints();
        let mut sum = 0.0;
        for joint in joints {
            sum += joint_angle(landmarks, joint)?;
        }
        let angle = sum / joints.len() as f32;

        if angle.is_finite() {
            Ok(angle)
        } else {
            Err(UnavailableInput::Degenerate)
        }
    }
}

fn joint_angle(landmarks: &LandmarkSet, joint: &JointTriple) -> Result<f32, UnavailableInput> {
    let point = |name: LandmarkName| {
        landmarks
            .get(name)
            .map(|lm| (lm.x, lm.y))
            .ok_or(UnavailableInput::Missing(name))
    };

    Ok(interior_angle(point(joint.a)?, point(joint.vertex)?, point(joint.c)?))
}
