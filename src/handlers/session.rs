//! Session control handlers

use axum::{extract::{rejection::JsonRejection, State}, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{SelectExercise, SelectExerciseResponse, StopSessionResponse};
use crate::tracking::SessionSnapshot;

/// Current count, stage and angle
pub async fn get(State(state): State<AppState>) -> AppResult<Json<SessionSnapshot>> {
    Ok(Json(state.session.lock().snapshot()))
}

/// Switch exercise; counting restarts from zero
pub async fn select_exercise(
    State(state): State<AppState>,
    payload: Result<Json<SelectExercise>, JsonRejection>,
) -> AppResult<Json<SelectExerciseResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let mut session = state.session.lock();
    let profile = session.select_exercise(&req.exercise)?;

    Ok(Json(SelectExerciseResponse {
        profile,
        snapshot: session.snapshot(),
    }))
}

pub async fn start(State(state): State<AppState>) -> AppResult<Json<SessionSnapshot>> {
    Ok(Json(state.session.lock().start_session()))
}

pub async fn stop(State(state): State<AppState>) -> AppResult<Json<StopSessionResponse>> {
    let mut session = state.session.lock();
    let summary = session.stop_session();

    Ok(Json(StopSessionResponse {
        summary,
        snapshot: session.snapshot(),
    }))
}
