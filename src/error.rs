//! Error handling module
//!
//! Provides the initialization error taxonomy: connection failures are fatal,
//! schema conflicts are tolerated, seed insert failures are non-fatal.

use mongodb::error::{Error as MongoError, ErrorKind};
use thiserror::Error;

/// Server error code for "collection already exists".
pub const NAMESPACE_EXISTS: i32 = 48;
/// Server error code for "index exists with different options".
pub const INDEX_OPTIONS_CONFLICT: i32 = 85;
/// Server error code for "index exists with different key spec".
pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Connection error: {0}")]
    Connection(#[source] MongoError),

    #[error("Schema conflict: {0}")]
    SchemaConflict(String),

    #[error("Insert error: {0}")]
    Insert(#[source] MongoError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] MongoError),
}

/// Result type alias for initializer operations
pub type InitResult<T> = Result<T, InitError>;

/// Extract the server command error code, if this is a command error.
pub fn command_error_code(err: &MongoError) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(cmd) => Some(cmd.code),
        _ => None,
    }
}

/// Whether a server error code is a schema conflict the initializer tolerates.
pub fn is_tolerable_conflict(code: i32) -> bool {
    matches!(
        code,
        NAMESPACE_EXISTS | INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerable_conflict_codes() {
        assert!(is_tolerable_conflict(NAMESPACE_EXISTS));
        assert!(is_tolerable_conflict(INDEX_OPTIONS_CONFLICT));
        assert!(is_tolerable_conflict(INDEX_KEY_SPECS_CONFLICT));
    }

    #[test]
    fn test_non_conflict_codes_are_fatal() {
        // 13 = Unauthorized, 11000 = DuplicateKey
        assert!(!is_tolerable_conflict(13));
        assert!(!is_tolerable_conflict(11000));
        assert!(!is_tolerable_conflict(0));
    }
}
