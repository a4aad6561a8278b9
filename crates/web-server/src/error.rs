use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use views::ViewError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("View error: {0}")]
    View(#[from] ViewError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::View(ViewError::UnknownPage(_) | ViewError::UnknownAnalysis(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::View(ViewError::AnalysisNotOnPage { .. }) => StatusCode::BAD_REQUEST,
            AppError::Analytics(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(error = %self, status = status.as_u16(), "Request rejected.");

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
