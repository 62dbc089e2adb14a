//! Error types for the portal.
//!
//! This module defines all error types used throughout the portal crate.
//! Missing records are not errors: mutators report them as `Ok(false)`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for portal operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Editing Errors ===
    /// An admin-only operation was attempted without an admin session.
    #[error("administrator login required")]
    AdminRequired,

    /// A required form field was empty.
    #[error("required field is empty: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A setting name did not match any known setting.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// A value could not be interpreted for its target field.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// Field the value was meant for.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for portal operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }

    /// Check if this error was caused by a missing admin session.
    #[must_use]
    pub fn is_admin_required(&self) -> bool {
        matches!(self, Self::AdminRequired)
    }

    /// Check if this error is a form presence-check failure.
    #[must_use]
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

/// Reject an empty (or whitespace-only) required form field.
///
/// # Errors
///
/// Returns [`Error::MissingField`] when `value` is blank.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::MissingField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::AdminRequired;
        assert_eq!(err.to_string(), "administrator login required");

        let err = Error::internal("test error");
        assert_eq!(err.to_string(), "internal error: test error");
    }

    #[test]
    fn test_error_is_admin_required() {
        assert!(Error::AdminRequired.is_admin_required());
        assert!(!Error::internal("test").is_admin_required());
    }

    #[test]
    fn test_missing_field_display() {
        let err = Error::MissingField { field: "title" };
        assert!(err.is_missing_field());
        assert_eq!(err.to_string(), "required field is empty: title");
    }

    #[test]
    fn test_require() {
        assert!(require("name", "Сталин").is_ok());
        assert!(require("name", "").unwrap_err().is_missing_field());
        assert!(require("name", "   ").unwrap_err().is_missing_field());
    }

    #[test]
    fn test_unknown_setting_display() {
        let err = Error::UnknownSetting("weather".to_string());
        assert_eq!(err.to_string(), "unknown setting: weather");
    }

    #[test]
    fn test_invalid_value_display() {
        let err = Error::invalid_value("progress", "must be between 0 and 100");
        let msg = err.to_string();
        assert!(msg.contains("progress"));
        assert!(msg.contains("between 0 and 100"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "empty username".to_string(),
        };
        assert!(err.to_string().contains("empty username"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
