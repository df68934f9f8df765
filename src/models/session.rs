//! Session request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tracking::{ExerciseProfile, SessionSnapshot, SessionSummary};

#[derive(Debug, Deserialize, Validate)]
pub struct SelectExercise {
    #[validate(length(min = 1, max = 64))]
    pub exercise: String,
}

#[derive(Debug, Serialize)]
pub struct SelectExerciseResponse {
    pub profile: ExerciseProfile,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub summary: SessionSummary,
    pub snapshot: SessionSnapshot,
}
