//! Error kinds surfaced by the request path, and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No identity header and not running in development mode.
    #[error("Missing authentication header")]
    Unauthenticated,

    /// Identity header present, but the email was never provisioned.
    #[error("User {0} is not authorized to use Kuzco")]
    Forbidden(String),

    /// Development mode is on, but the development account is missing from the store.
    #[error("Development environment detected, but user {0} is missing; run the seed binary")]
    MisconfiguredEnvironment(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MisconfiguredEnvironment(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::MisconfiguredEnvironment(_) => "misconfigured_environment",
            AppError::BadRequest(_) => "bad_request",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                "database error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: self.code(),
            detail,
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_distinct_statuses() {
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("x@y.z".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::MisconfiguredEnvironment("kronk@dev.local".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn misconfigured_environment_has_its_own_code() {
        let err = AppError::MisconfiguredEnvironment("kronk@dev.local".into());
        assert_eq!(err.code(), "misconfigured_environment");
        assert!(err.to_string().contains("kronk@dev.local"));
        assert_ne!(err.code(), AppError::Internal(anyhow::anyhow!("boom")).code());
    }

    #[test]
    fn forbidden_message_names_the_email() {
        let err = AppError::Forbidden("stranger@example.com".into());
        assert!(err.to_string().contains("stranger@example.com"));
    }
}
