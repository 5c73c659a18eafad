//! Error types for the Lensbook application.

use thiserror::Error;

/// A shared error type for the entire Lensbook application.
///
/// Form validation problems are not represented here; they are collected into
/// [`crate::schedule::SubmissionErrors`] so every offending field can be shown
/// at once. This type covers collaborator failures and schedule faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LensbookError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No authenticated owner was supplied by the identity provider
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A generated slot escaped the daily window although validation passed.
    #[error("Schedule fault: {0}")]
    ScheduleFault(String),
}

impl LensbookError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a ScheduleFault error
    pub fn schedule_fault(message: impl Into<String>) -> Self {
        Self::ScheduleFault(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a schedule fault
    pub fn is_schedule_fault(&self) -> bool {
        matches!(self, Self::ScheduleFault(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LensbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LensbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LensbookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for LensbookError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LensbookError>`.
pub type Result<T> = std::result::Result<T, LensbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: LensbookError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(&err, LensbookError::Io { message } if message.contains("PermissionDenied")));
    }

    #[test]
    fn test_not_found_display() {
        let err = LensbookError::not_found("session", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entity not found: session 'abc'");
    }
}
