//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library API
///
/// The engine variants follow one taxonomy:
/// - configuration defects (`Config`, `Configuration`, `MissingMapping`) are
///   startup-time failures and never the client's fault
/// - `InvalidSortKey` and `InvalidFieldSelection` reject client input
/// - `UnknownField` means shaping ran without prior field validation
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Invalid static configuration (mapping tables, link base URL, ...)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// No registry entry exists for a (source, destination) type pair
    #[error("No mapping registered from {source_type} to {destination_type}")]
    MissingMapping {
        /// Source type name
        source_type: &'static str,
        /// Destination type name
        destination_type: &'static str,
    },

    /// The `orderBy` clause references a key that has no property mapping
    #[error("Invalid sort key in orderBy clause: {0}")]
    InvalidSortKey(String),

    /// The `fields` list references a property the resource does not expose
    #[error("Invalid field selection: {0}")]
    InvalidFieldSelection(String),

    /// Shaping was asked for a field that the resource schema does not declare
    #[error("Unknown field '{field}' on resource {resource}")]
    UnknownField {
        /// Resource schema name
        resource: &'static str,
        /// Requested field name
        field: String,
    },

    /// A response head (status, header value) could not be built
    #[error("HTTP error: {0}")]
    Http(Box<axum::http::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No requested media range can be produced (406)
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// Resource conflict (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Persistence failure reported by the repository
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIG_ERROR",
                        "Internal server error",
                    ),
                )
            }

            Error::Configuration(msg) => {
                tracing::error!("Invalid configuration: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIG_ERROR",
                        "Internal server error",
                    ),
                )
            }

            Error::MissingMapping {
                source_type,
                destination_type,
            } => {
                tracing::error!(
                    source_type,
                    destination_type,
                    "No mapping registered for type pair"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "MAPPING_NOT_REGISTERED",
                        "Internal server error",
                    ),
                )
            }

            Error::InvalidSortKey(clause) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_code(
                    StatusCode::BAD_REQUEST,
                    "INVALID_SORT_KEY",
                    format!("Cannot sort by '{}'", clause),
                ),
            ),

            Error::InvalidFieldSelection(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_code(
                    StatusCode::BAD_REQUEST,
                    "INVALID_FIELD_SELECTION",
                    format!("Cannot select fields '{}'", fields),
                ),
            ),

            Error::UnknownField { resource, field } => {
                tracing::error!(resource, field = %field, "Shaping requested an undeclared field");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "UNKNOWN_FIELD",
                        "Internal server error",
                    ),
                )
            }

            Error::Http(e) => {
                tracing::error!("HTTP error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "HTTP_ERROR",
                        "Internal server error",
                    ),
                )
            }

            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "IO_ERROR",
                        "Internal server error",
                    ),
                )
            }

            Error::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::with_code(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ),

            Error::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_code(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ),

            Error::NotAcceptable(msg) => (
                StatusCode::NOT_ACCEPTABLE,
                ErrorResponse::with_code(StatusCode::NOT_ACCEPTABLE, "NOT_ACCEPTABLE", msg),
            ),

            Error::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::with_code(StatusCode::CONFLICT, "CONFLICT", msg),
            ),

            Error::Persistence(msg) => {
                tracing::error!("Persistence failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "PERSISTENCE_ERROR",
                        "An unexpected fault happened. Try again later",
                    ),
                )
            }

            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_code(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Internal server error",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

// Manual From implementations for boxed errors
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<axum::http::Error> for Error {
    fn from(err: axum::http::Error) -> Self {
        Error::Http(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let response = Error::InvalidSortKey("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::InvalidFieldSelection("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_defects_map_to_internal_error() {
        let response = Error::MissingMapping {
            source_type: "A",
            destination_type: "B",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = Error::UnknownField {
            resource: "AuthorDto",
            field: "shoeSize".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_and_conflict_status() {
        assert_eq!(
            Error::NotFound("author".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::Conflict("author".to_string()).into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_not_acceptable_status() {
        let response = Error::NotAcceptable("text/html".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_http_error_hides_details() {
        let err = axum::http::HeaderValue::from_str("bad\nvalue")
            .map_err(axum::http::Error::from)
            .unwrap_err();
        let response = Error::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_serialization_skips_missing_code() {
        let body = ErrorResponse::new(StatusCode::BAD_REQUEST, "bad");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json.get("code").is_none());
    }
}
