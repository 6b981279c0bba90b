//! Error types and result aliases for aurs operations.
//!
//! Provides a unified error type that covers all error conditions across
//! the aurs crates with actionable error messages.

use thiserror::Error;

/// Unified error type for all aurs operations
#[derive(Error, Debug)]
pub enum AurError {
    // Transport errors
    #[error("Network error for '{target}': {message}")]
    Network {
        target: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Protocol errors
    #[error("Registry returned status {status} for '{target}'")]
    Status { status: u16, target: String },

    #[error("Registry error for '{target}': {message}")]
    Rpc { target: String, message: String },

    // Decode errors
    #[error("Failed to decode registry response for '{target}': {message}")]
    Decode { target: String, message: String },

    // CLI errors
    #[error("Unknown search field '{value}'")]
    InvalidSearchField { value: String },

    #[error("Failed to encode output: {message}")]
    Output { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for aurs operations
pub type AurResult<T> = Result<T, AurError>;

impl AurError {
    /// Create a network error from any error type
    pub fn network<E>(target: impl Into<String>, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            target: target.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Check if this error is transient rather than a usage problem
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AurError::Network { .. } | AurError::Status { .. } | AurError::Io { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AurError::Network { .. } => Some("Check your internet connection and try again"),
            AurError::Status { .. } => {
                Some("The AUR may be under heavy load; try again in a few minutes")
            },
            AurError::Rpc { .. } => {
                Some("Narrow the search term; the AUR rejects queries with too many results")
            },
            AurError::InvalidSearchField { .. } => Some(
                "Valid fields: name, name-desc, maintainer, depends, makedepends, optdepends, checkdepends",
            ),
            _ => None,
        }
    }
}
