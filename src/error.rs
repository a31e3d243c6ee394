//! Error types for rating calculations
//!
//! Rating operations are pure, so every failure is reported synchronously
//! through [`RatingError`] and no input is ever left partially updated.

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RatingError>;

/// Failure conditions surfaced by the rating engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal rating error: {message}")]
    InternalError { message: String },
}

impl RatingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RatingError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        RatingError::ConfigurationError {
            message: message.into(),
        }
    }
}
