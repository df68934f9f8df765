//! Frame ingestion handler

use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::{AppState, AppResult};
use crate::models::{FrameRequest, FrameResponse};

/// Feed one pose observation to the session
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<FrameRequest>, JsonRejection>,
) -> AppResult<Json<FrameResponse>> {
    let Json(req) = payload?;
    let (timestamp, landmarks) = req.into_parts()?;
    let now = timestamp.unwrap_or_else(|| state.elapsed_secs());

    let mut session = state.session.lock();
    let outcome = session.process_frame(landmarks.as_ref(), now)?;

    Ok(Json(FrameResponse::new(outcome, session.snapshot())))
}
