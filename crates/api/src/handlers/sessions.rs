use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::debug;
use tutorhub_core::{
    models::generation::{CommitResponse, GenerateSessionsBody, PreviewResponse},
    scheduler,
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn preview_sessions(
    State(state): State<Arc<ApiState>>,
    Path(center_id): Path<Uuid>,
    Json(payload): Json<GenerateSessionsBody>,
) -> Result<Json<PreviewResponse>, AppError> {
    let request = payload.into_request(center_id);
    debug!(
        "Previewing sessions for center {} tutor {}",
        center_id, request.tutor_id
    );

    let outcome =
        scheduler::preview(state.sessions.as_ref(), &state.settings, &request).await?;

    Ok(Json(outcome.into()))
}

#[axum::debug_handler]
pub async fn commit_sessions(
    State(state): State<Arc<ApiState>>,
    Path(center_id): Path<Uuid>,
    Json(payload): Json<GenerateSessionsBody>,
) -> Result<Json<CommitResponse>, AppError> {
    let request = payload.into_request(center_id);
    debug!(
        "Committing sessions for center {} tutor {}",
        center_id, request.tutor_id
    );

    let outcome =
        scheduler::commit(state.sessions.as_ref(), &state.settings, &request).await?;

    Ok(Json(outcome.into()))
}
