//! Errors reported by the engine ports
//!
//! Port implementations describe failures with an [`EngineError`] carrying a
//! kind, a message and, when known, the entity involved. The HTTP layer maps
//! the kind onto a status code.
//!
//! # Example
//!
//! ```rust
//! use bpmn_rest::engine::{EngineError, EngineErrorKind};
//!
//! let error = EngineError::not_found("Task", "task-42");
//! assert!(matches!(error.kind, EngineErrorKind::NotFound));
//! assert_eq!(error.entity_id.as_deref(), Some("task-42"));
//! ```

use std::fmt;

/// Category of engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineErrorKind {
    /// Referenced object does not exist
    NotFound,
    /// The engine rejected an argument
    IllegalArgument,
    /// The engine could not be reached
    Unavailable,
    /// Other/unknown error
    Other,
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::IllegalArgument => write!(f, "illegal_argument"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured engine error with entity context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    /// The category of error
    pub kind: EngineErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g., "Task", "ProcessInstance")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl EngineError {
    /// Create a new engine error
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        Self {
            kind: EngineErrorKind::NotFound,
            message: format!("Could not find {} with id '{}'.", entity_type, entity_id),
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
        }
    }

    /// Create an illegal argument error
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::IllegalArgument, message)
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Unavailable, message)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Engine {} error: {}", self.kind, self.message)?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {}

/// Failure raised by a [`DiagramRenderer`](super::DiagramRenderer)
#[derive(Debug, thiserror::Error)]
#[error("diagram rendering failed: {message}")]
pub struct RenderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RenderError {
    /// Create a render error without an underlying cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a render error wrapping the underlying cause
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
