//! Frame submission model

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::pose::{Landmark, LandmarkSet, PoseError};
use crate::tracking::{FrameOutcome, RepEvent, SessionSnapshot};

/// Landmarks as sent by a client
///
/// Either keyed by landmark name or the raw 33-point MediaPipe array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PosePayload {
    Named(LandmarkSet),
    Indexed(Vec<Landmark>),
}

impl PosePayload {
    /// Range-check every point's visibility
    pub fn validate_points(&self) -> Result<(), ValidationErrors> {
        match self {
            PosePayload::Named(set) => {
                for (_, landmark) in set.iter() {
                    landmark.validate()?;
                }
            }
            PosePayload::Indexed(points) => {
                for landmark in points {
                    landmark.validate()?;
                }
            }
        }
        Ok(())
    }

    pub fn into_landmark_set(self) -> Result<LandmarkSet, PoseError> {
        match self {
            PosePayload::Named(set) => Ok(set),
            PosePayload::Indexed(points) => LandmarkSet::from_mediapipe(&points),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FrameRequest {
    /// Seconds since the client's clock origin; server uptime when absent
    #[validate(range(min = 0.0))]
    pub timestamp: Option<f64>,
    /// `null` or absent when the estimator found no pose
    #[serde(default)]
    pub landmarks: Option<PosePayload>,
}

impl FrameRequest {
    /// Validate the request and resolve its landmarks
    pub fn into_parts(self) -> Result<(Option<f64>, Option<LandmarkSet>), FrameRequestError> {
        self.validate()?;

        let landmarks = match self.landmarks {
            Some(payload) => {
                payload.validate_points()?;
                Some(payload.into_landmark_set()?)
            }
            None => None,
        };

        Ok((self.timestamp, landmarks))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrameRequestError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Pose(#[from] PoseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Tracked,
    Idle,
    Skipped,
}

#[derive(Debug, Serialize)]
pub struct FrameResponse {
    pub status: FrameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<RepEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_reason: Option<String>,
    pub snapshot: SessionSnapshot,
}

impl FrameResponse {
    pub fn new(outcome: FrameOutcome, snapshot: SessionSnapshot) -> Self {
        let mut response = Self {
            status: FrameStatus::Skipped,
            raw_angle: None,
            smoothed_angle: None,
            event: None,
            skipped_reason: None,
            snapshot,
        };

        match outcome {
            FrameOutcome::Skipped(reason) => {
                response.skipped_reason = Some(reason.to_string());
            }
            FrameOutcome::Idle { raw_angle } => {
                response.status = FrameStatus::Idle;
                response.raw_angle = Some(raw_angle);
            }
            FrameOutcome::Tracked { raw_angle, update } => {
                response.status = FrameStatus::Tracked;
                response.raw_angle = Some(raw_angle);
                response.smoothed_angle = Some(update.angle);
                response.event = Some(update.event);
            }
        }

        response
    }
}
