// Error types for cinder.
// Handles backend API errors, store errors, and configuration errors.

use thiserror::Error;

/// User-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend rejected the session (HTTP 401).
    AuthRequired,
    /// Repository or run does not exist (HTTP 404).
    NotFound,
    /// Any other status, transport, or decoding failure.
    RequestFailed,
    /// Input rejected before a request was attempted.
    Validation,
}

#[derive(Error, Debug)]
pub enum CinderError {
    #[error("{0}")]
    Api(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Session is not authenticated")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Backend returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CinderError {
    /// Project this error onto the user-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CinderError::Unauthorized => ErrorKind::AuthRequired,
            CinderError::NotFound(_) => ErrorKind::NotFound,
            CinderError::Validation(_) | CinderError::Config(_) => ErrorKind::Validation,
            CinderError::Api(_)
            | CinderError::Timeout
            | CinderError::Status(_)
            | CinderError::Json(_)
            | CinderError::Io(_) => ErrorKind::RequestFailed,
        }
    }

    /// Transport-level failure raised before any status was inspected.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CinderError::Api(_) | CinderError::Timeout | CinderError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CinderError>;
