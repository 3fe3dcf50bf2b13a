//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use weft_core::engine::EngineError;

use crate::api::schema::ValidationErrors;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed schema validation
    Validation(ValidationErrors),
    /// A mandatory query parameter was absent or empty
    MissingParameter(&'static str),
    NotFound(String),
    Unauthorized,
    Forbidden,
    Engine(EngineError),
    InternalError(String),
}

impl ApiError {
    pub fn config_id_missing() -> Self {
        ApiError::MissingParameter("Config Id is mandatory")
    }

    pub fn task_id_missing() -> Self {
        ApiError::MissingParameter("Task Id is mandatory")
    }
}

fn message(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "message": msg.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::MissingParameter(msg) => message(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => message(StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized => {
                message(StatusCode::UNAUTHORIZED, "Missing authorization token")
            }
            ApiError::Forbidden => message(StatusCode::FORBIDDEN, "Forbidden"),
            ApiError::Engine(err) => {
                tracing::error!("Engine error: {:?}", err);
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Engine(err)
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::convert::{EntityKind, UnknownEntityKind};

    #[test]
    fn test_engine_errors_map_to_status() {
        let cases = [
            (
                EngineError::not_found(EntityKind::Task, "TASK_1"),
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::config_not_found(EntityKind::Scenario, "s"),
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::from(UnknownEntityKind("widget".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                EngineError::Internal("disk full".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            ApiError::config_id_missing().into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }
}
