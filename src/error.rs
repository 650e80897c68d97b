/// Error types for history-onboard
///
/// This module defines all possible errors that can occur while onboarding a user.
/// Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for history-onboard operations
#[derive(Error, Debug)]
pub enum OnboardError {
    /// History transcript is missing, unreadable or undecodable
    #[error("Failed to ingest history from {}: {source}", path.display())]
    Ingest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No stored profile for this user
    #[error("No profile found for user: {0}")]
    ProfileNotFound(String),

    /// Stored profile exists but cannot be parsed
    #[error("Profile for user {user_id} is corrupt: {source}")]
    CorruptProfile {
        user_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// User id is empty or would escape its storage directory
    #[error("Invalid user id: {0:?}")]
    InvalidUserId(String),

    /// I/O errors (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors while writing profiles or configs
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logger could not be installed
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Result type alias for history-onboard operations
pub type Result<T> = std::result::Result<T, OnboardError>;

impl OnboardError {
    /// Stable tag for callers that map errors onto their own response format
    pub fn kind(&self) -> &'static str {
        match self {
            OnboardError::Ingest { .. } => "ingest",
            OnboardError::ProfileNotFound(_) => "not_found",
            OnboardError::CorruptProfile { .. } => "corrupt_data",
            OnboardError::InvalidUserId(_) => "invalid_user_id",
            OnboardError::Io(_) => "io",
            OnboardError::Serialization(_) => "serialization",
            OnboardError::Config(_) => "config",
            OnboardError::Logger(_) => "logger",
        }
    }

    /// Convert OnboardError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            OnboardError::Ingest { path, source } => {
                format!(
                    "Failed to extract patterns from {}: {}",
                    path.display(),
                    source
                )
            }
            OnboardError::ProfileNotFound(_) => {
                "No profile found. Run onboarding first.".to_string()
            }
            OnboardError::CorruptProfile { user_id, .. } => {
                format!(
                    "Stored profile for '{}' is unreadable. Run onboarding again to rebuild it.",
                    user_id
                )
            }
            OnboardError::InvalidUserId(id) => {
                format!("'{}' is not a usable user id", id)
            }
            OnboardError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            OnboardError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            OnboardError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            OnboardError::Logger(msg) => {
                format!("Could not start logging: {}", msg)
            }
        }
    }
}
