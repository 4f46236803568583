use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failures a single request can hit. None of them outlive the request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("path is outside the media root")]
    PathTraversal,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PathTraversal => StatusCode::FORBIDDEN,
            AppError::Io(e) => {
                tracing::error!("I/O failure while serving request: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
