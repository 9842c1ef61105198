//! View-state error types.
//!
//! Reads never surface these to the table; they are returned by store
//! writes and configuration loading, and logged where a write is dropped.

use std::path::PathBuf;
use thiserror::Error;

/// View-state operation error.
#[derive(Debug, Error)]
pub enum ViewStateError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state blob or settings file could not be encoded.
    #[error("Failed to serialize {what}")]
    Serialization {
        what: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A stored blob or settings file could not be decoded.
    #[error("Failed to deserialize {what}")]
    Deserialization {
        what: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ViewStateError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::Serialization { what, .. } => {
                format!("The {what} could not be written.")
            }
            Self::Deserialization { what, .. } => {
                format!("The {what} could not be read. It may be corrupted.")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::InvalidConfig { field, reason } => {
                format!("The setting '{field}' {reason}.")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } => {
                Some("Delete the file to fall back to the default table layout.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different storage directory.".into())
            }
            Self::InvalidConfig { .. } => Some("Edit the settings file and try again.".into()),
        }
    }
}

/// Result type alias for view-state operations.
pub type Result<T> = std::result::Result<T, ViewStateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_suggestion_depends_on_operation() {
        let read = ViewStateError::Io {
            operation: "read",
            path: PathBuf::from("/tmp/x.json"),
            source: std::io::Error::other("boom"),
        };
        assert!(read.suggestion().unwrap().contains("read it"));
        assert!(read.user_message().contains("/tmp/x.json"));

        let write = ViewStateError::Io {
            operation: "write",
            path: PathBuf::from("/tmp/x.json"),
            source: std::io::Error::other("boom"),
        };
        assert!(write.suggestion().unwrap().contains("write"));
    }

    #[test]
    fn invalid_config_names_field() {
        let err = ViewStateError::InvalidConfig {
            field: "default_page_size",
            reason: "must be greater than zero".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: default_page_size must be greater than zero"
        );
        assert!(err.user_message().contains("default_page_size"));
    }
}
