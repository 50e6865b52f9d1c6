//! Error types for grading operations.
//!
//! Every failure the grading core can report is a variant of
//! [`CertigradeError`]. The pipeline itself only ever produces
//! `InvalidScore` and `InvalidInput`; `UpstreamUnavailable` is raised by the
//! vision, market-data and persistence collaborators and passed through
//! untouched so callers can decide on retry policy.
//!
//! # Error Codes
//!
//! - E020-E029: Configuration errors
//! - E040-E049: Storage and I/O errors
//! - E050-E059: Validation errors
//! - E060-E069: Upstream collaborator errors

use crate::core::Axis;
use thiserror::Error;

/// Structured error code for documentation and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Config error - invalid value
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Storage error - record could not be read or written
    pub const STORAGE: ErrorCode = ErrorCode("E040");
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E049");
    /// Validation error - axis score outside [0, 10]
    pub const INVALID_SCORE: ErrorCode = ErrorCode("E050");
    /// Validation error - malformed request input
    pub const INVALID_INPUT: ErrorCode = ErrorCode("E051");
    /// Upstream error - collaborator unavailable
    pub const UPSTREAM_UNAVAILABLE: ErrorCode = ErrorCode("E060");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for certigrade operations
#[derive(Debug, Error)]
pub enum CertigradeError {
    /// An axis score outside the closed range [0, 10] (or not a number)
    #[error("Invalid {axis} score {value}: must be between 0.0 and 10.0")]
    InvalidScore { axis: Axis, value: f64 },

    /// Negative base value, malformed card identity, bad image set
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A vision, market-data or persistence collaborator failed
    #[error("{service} unavailable: {message}")]
    UpstreamUnavailable { service: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Grading history could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CertigradeError {
    /// Create an invalid score error for an axis
    pub fn invalid_score(axis: Axis, value: f64) -> Self {
        Self::InvalidScore { axis, value }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an upstream failure attributed to a named collaborator
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidScore { .. } => ErrorCode::INVALID_SCORE,
            Self::InvalidInput(_) => ErrorCode::INVALID_INPUT,
            Self::UpstreamUnavailable { .. } => ErrorCode::UPSTREAM_UNAVAILABLE,
            Self::Configuration(_) => ErrorCode::CONFIG_INVALID,
            Self::Storage(_) => ErrorCode::STORAGE,
            Self::Io(_) | Self::Json(_) => ErrorCode::IO_GENERIC,
        }
    }

    /// Only collaborator outages are worth retrying; the core is deterministic.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }

    /// Whether the caller can fix the problem by changing its input.
    #[must_use]
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidScore { .. } | Self::InvalidInput(_) | Self::Configuration(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, CertigradeError>;
