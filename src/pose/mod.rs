//! Pose Module - landmark input and joint angles
//!
//! The pose estimator is external. This module only reads its output:
//! - `landmark`: named points with visibility
//! - `geometry`: interior joint angle
//! - `extractor`: per-exercise angle selection

pub mod landmark;
pub mod geometry;
pub mod extractor;

pub use landmark::{Landmark, LandmarkName, LandmarkSet, POSE_LANDMARK_COUNT};
pub use geometry::interior_angle;
pub use extractor::{AngleExtractor, JointTriple, DEFAULT_VISIBILITY_THRESHOLD};

use thiserror::Error;

/// Why a frame produced no usable angle
///
/// Recovered locally by skipping the frame; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum UnavailableInput {
    #[error("no pose detected")]
    NoPose,

    #[error("landmark {0} missing")]
    Missing(LandmarkName),

    #[error("landmark {name} visibility {visibility:.2} below {threshold:.2}")]
    LowVisibility {
        name: LandmarkName,
        visibility: f32,
        threshold: f32,
    },

    #[error("joint angle is not finite")]
    Degenerate,
}

/// Malformed pose input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    #[error("expected {expected} landmarks, got {actual}")]
    PointCount { expected: usize, actual: usize },
}
