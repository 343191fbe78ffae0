//! services/client/src/error.rs
//!
//! Defines the error type for the attendance form client.

use crate::config::ConfigError;
use attendance_core::domain::ValidationError;
use attendance_core::ports::PortError;

/// Shown when a submission is blocked for missing input.
pub const VALIDATION_MESSAGE: &str = "Please fill in all fields.";
/// Shown when a create request fails or is refused.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save attendance.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required form field was empty; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The create request did not reach the store or was refused by it.
    #[error("Network error: {0}")]
    Network(#[source] PortError),

    /// Refreshing the record list failed; the previous list is still shown.
    #[error("Could not refresh records: {0}")]
    RemoteFetch(#[source] PortError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Text for the blocking alert shown to the user, if this error warrants one.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ClientError::Validation(_) => Some(VALIDATION_MESSAGE),
            ClientError::Network(_) => Some(SAVE_FAILED_MESSAGE),
            ClientError::RemoteFetch(_) => None,
            ClientError::Config(_) | ClientError::Io(_) => None,
        }
    }
}
