use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/centers/:center_id/sessions/generate/preview",
            post(handlers::sessions::preview_sessions),
        )
        .route(
            "/api/centers/:center_id/sessions/generate/commit",
            post(handlers::sessions::commit_sessions),
        )
}
