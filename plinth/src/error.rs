//! Error types and HTTP response conversion
//!
//! Every failure a handler can produce is one of the [`Error`] variants, and
//! every variant renders as the same JSON envelope:
//!
//! ```json
//! { "success": false, "error": 404, "message": "resource not found" }
//! ```
//!
//! Authorization failures additionally carry a machine-readable `code`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::repository::{RepositoryError, RepositoryErrorKind};

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Service error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Store failure; the kind decides the status
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// JWT key or validation setup error (requires `jwt` feature)
    #[cfg(feature = "jwt")]
    #[error("JWT error: {0}")]
    Jwt(Box<jsonwebtoken::errors::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or missing input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, malformed or expired credential (401)
    #[error("Authentication failed: {message}")]
    Unauthorized {
        /// Machine-readable reason, e.g. `token_expired`
        code: &'static str,
        /// Human-readable description
        message: String,
    },

    /// Valid credential lacking the required permission (403)
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Machine-readable reason, e.g. `permission_not_found`
        code: &'static str,
        /// Human-readable description
        message: String,
    },

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route exists but not for this verb (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Well-formed request that cannot be applied (422)
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a 401 with a code
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Error::Unauthorized {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for a 403 with a code
    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Error::Forbidden {
            code,
            message: message.into(),
        }
    }

    /// The generic 404 used when a lookup comes back empty
    pub fn resource_not_found() -> Self {
        Error::NotFound("resource not found".to_string())
    }

    /// HTTP status this error renders with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Repository(e) => match e.kind {
                RepositoryErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ if e.is_unprocessable() => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Config(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            #[cfg(feature = "jwt")]
            Error::Jwt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// HTTP status code
    pub error: u16,

    /// Short description
    pub message: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: status.as_u16(),
            message: message.into(),
            code: None,
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::new(status, message)
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.error, self.message)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Error::BadRequest(msg) => ErrorResponse::new(status, msg),

            Error::Unauthorized { code, message } => {
                tracing::warn!(code, "Rejected credential: {}", message);
                ErrorResponse::with_code(status, code, message)
            }

            Error::Forbidden { code, message } => {
                tracing::warn!(code, "Insufficient permission: {}", message);
                ErrorResponse::with_code(status, code, message)
            }

            Error::NotFound(msg) => ErrorResponse::new(status, msg),

            Error::MethodNotAllowed => ErrorResponse::new(status, "method not allowed"),

            Error::Unprocessable(msg) => ErrorResponse::new(status, msg),

            Error::Repository(ref e) => {
                let message = match e.kind {
                    RepositoryErrorKind::NotFound => "resource not found",
                    _ if e.is_unprocessable() => "unprocessable",
                    _ => {
                        tracing::error!(
                            operation = %e.operation,
                            kind = %e.kind,
                            retriable = e.is_retriable(),
                            "Repository error: {}", e.message
                        );
                        "internal server error"
                    }
                };
                ErrorResponse::new(status, message)
            }

            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::new(status, "internal server error")
            }

            #[cfg(feature = "jwt")]
            Error::Jwt(e) => {
                tracing::error!("JWT setup error: {}", e);
                ErrorResponse::new(status, "internal server error")
            }

            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ErrorResponse::new(status, "internal server error")
            }

            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::new(status, "internal server error")
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

#[cfg(feature = "jwt")]
impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Jwt(Box::new(err))
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Repository(RepositoryError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;
    use http_body_util::BodyExt;

    async fn render(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new(StatusCode::NOT_FOUND, "resource not found");
        assert_eq!(err.error, 404);
        assert!(!err.success);
        assert!(err.code.is_none());
    }

    #[test]
    fn test_error_response_with_code() {
        let err = ErrorResponse::with_code(
            StatusCode::UNAUTHORIZED,
            "token_expired",
            "Token expired.",
        );
        assert_eq!(err.error, 401);
        assert_eq!(err.code.as_deref(), Some("token_expired"));
        assert_eq!(err.to_string(), "401 Token expired.");
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = render(Error::resource_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 404, "message": "resource not found"})
        );
    }

    #[tokio::test]
    async fn test_forbidden_carries_code() {
        let (status, body) = render(Error::forbidden(
            "permission_not_found",
            "Permission not found.",
        ))
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "permission_not_found");
        assert_eq!(body["error"], 403);
    }

    #[tokio::test]
    async fn test_repository_kinds_map_to_statuses() {
        let (status, _) = render(RepositoryError::not_found("Drink", "999").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = render(RepositoryError::already_exists("Drink", "Water").into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "unprocessable");

        let (status, body) = render(
            RepositoryError::database_error(RepositoryOperation::Create, "relation missing").into(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_leaked() {
        let (status, body) = render(Error::Internal("pool exploded at 0xdeadbeef".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "internal server error");
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(
            Error::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
