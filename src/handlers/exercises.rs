//! Exercise profile handlers

use axum::{extract::{State, Path}, Json};

use crate::{AppState, AppResult, AppError};
use crate::tracking::ExerciseProfile;

/// List all configured exercises
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ExerciseProfile>>> {
    Ok(Json(state.registry.iter().copied().collect()))
}

/// Get one exercise profile by name
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<ExerciseProfile>> {
    let profile = state.registry
        .get(&name)
        .map_err(|_| AppError::NotFound(format!("Exercise not found: {}", name)))?;

    Ok(Json(profile))
}
