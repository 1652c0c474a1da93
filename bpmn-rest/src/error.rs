//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::{EngineError, EngineErrorKind, RenderError};

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory engine seed file could not be decoded
    #[error("Invalid engine seed file {}: {source}", path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed or missing request parameter (400)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Referenced task, process instance, identity link or variable is absent (404)
    #[error("Not found: {message}")]
    NotFound {
        /// Kind of entity that was looked up, e.g. "Task"
        entity: &'static str,
        message: String,
    },

    /// The diagram renderer failed while exporting an image (400)
    #[error("Error exporting diagram: {0}")]
    DiagramExport(#[from] RenderError),

    /// Error reported by one of the engine ports
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a not-found error for the given entity kind
    pub fn not_found(entity: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidArgument(_) | Error::DiagramExport(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Engine(e) => match e.kind {
                EngineErrorKind::NotFound => StatusCode::NOT_FOUND,
                EngineErrorKind::IllegalArgument => StatusCode::BAD_REQUEST,
                EngineErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                EngineErrorKind::Other => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Config(_) | Error::Io(_) | Error::Seed { .. } | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
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
        let status = self.status_code();
        let error_response = match self {
            Error::InvalidArgument(msg) => {
                tracing::debug!("Rejecting request: {}", msg);
                ErrorResponse::with_code(status, "INVALID_ARGUMENT", msg)
            }

            Error::NotFound { entity, message } => {
                tracing::debug!(entity, "Lookup failed: {}", message);
                ErrorResponse::with_code(status, "NOT_FOUND", message)
            }

            Error::DiagramExport(e) => {
                tracing::warn!(error = %e, "Diagram export failed");
                ErrorResponse::with_code(status, "DIAGRAM_EXPORT_FAILED", e.to_string())
            }

            Error::Engine(ref e) => {
                tracing::error!(
                    kind = %e.kind,
                    entity_type = ?e.entity_type,
                    entity_id = ?e.entity_id,
                    "Engine error: {}", e.message
                );

                let code = format!("ENGINE_{}", e.kind.to_string().to_uppercase());

                // Unavailable/other faults stay opaque to the caller
                let message = match e.kind {
                    EngineErrorKind::NotFound | EngineErrorKind::IllegalArgument => e.message.clone(),
                    EngineErrorKind::Unavailable => "Process engine unavailable".to_string(),
                    EngineErrorKind::Other => "Process engine operation failed".to_string(),
                };

                ErrorResponse::with_code(status, code, message)
            }

            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                ErrorResponse::with_code(status, "CONFIG_ERROR", e.to_string())
            }

            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                ErrorResponse::with_code(status, "IO_ERROR", "I/O operation failed")
            }

            Error::Seed { path, source } => {
                tracing::error!(path = %path.display(), "Engine seed error: {}", source);
                ErrorResponse::with_code(status, "SEED_ERROR", "Engine seed could not be loaded")
            }

            Error::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse::with_code(status, "INTERNAL_ERROR", "Internal server error")
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
