//! # Error Handling Middleware
//!
//! Maps `HubError` values onto HTTP status codes and a JSON body of the form
//! `{"error": message}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;
use tutorhub_core::errors::HubError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use tutorhub_api::middleware::error_handling::AppError;
/// use tutorhub_core::errors::HubError;
///
/// async fn handler(count: usize) -> Result<Json<usize>, AppError> {
///     if count == 0 {
///         return Err(AppError(HubError::invalid("count must be positive")));
///     }
///     Ok(Json(count))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub HubError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HubError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HubError::NotFound(_) => StatusCode::NOT_FOUND,
            HubError::PersistenceFailure(_) | HubError::Internal(_) => {
                error!("Request failed: {:?}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `HubResult` inside handlers returning `Result<T, AppError>`.
impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        AppError(err)
    }
}

/// Store errors surfacing outside the generator are persistence failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(HubError::PersistenceFailure(err))
    }
}

/// Maps a HubError straight to an HTTP response.
pub fn map_error(err: HubError) -> Response {
    AppError(err).into_response()
}
