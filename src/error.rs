//! Error types for privacy accounting.

/// Errors that can occur while computing privacy guarantees.
#[derive(Debug, thiserror::Error)]
pub enum AccountantError {
    /// Invalid parameter provided.
    #[error("invalid parameter: {msg}")]
    InvalidParameters {
        /// Human-readable error description.
        msg: String,
    },

    /// Numerical computation error.
    #[error("numerical error: {msg}")]
    NumericalError {
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for accounting operations.
pub type Result<T> = std::result::Result<T, AccountantError>;

impl AccountantError {
    /// Create an invalid parameter error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters { msg: msg.into() }
    }

    /// Create a numerical error.
    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        Self::NumericalError { msg: msg.into() }
    }
}
