/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
