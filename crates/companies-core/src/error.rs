use thiserror::Error;

/// Application-wide error types for the CompanyEmployees API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested company, employee or user does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request payload failed field validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Request could not be understood (missing or malformed body, bad header).
    #[error("{0}")]
    BadRequest(String),

    /// Bearer token missing, malformed, or rejected by the validation policy.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// None of the media types in the `Accept` header can be produced.
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// Unique constraint violated (e.g. duplicate user name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true for errors caused by the server rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_) | AppError::ConfigError(_) | AppError::Generic(_)
        )
    }
}
