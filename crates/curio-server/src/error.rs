//! HTTP mapping for the core error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use curio_core::Error;

/// Wrapper that turns a core error into an HTTP response.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // Upstream outage: the request had no retrieval basis.
            Error::ServiceUnavailable(_) => StatusCode::BAD_GATEWAY,
            Error::MissingResource(_) => StatusCode::NOT_FOUND,
            Error::DimensionMismatch { .. }
            | Error::Synthesis(_)
            | Error::Config(_)
            | Error::Http(_)
            | Error::Json(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Error::DimensionMismatch { .. } = &self.0 {
            // Systemic misconfiguration signal, not a per-request blip.
            error!("{}", self.0);
        }
        let status = self.status_code();
        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::InvalidRequest("empty".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::ServiceUnavailable("down".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError(Error::MissingResource("file".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::DimensionMismatch { expected: 512, actual: 384 }).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
