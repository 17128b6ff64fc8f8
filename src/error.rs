//! Error taxonomy for transfers

use thiserror::Error;

/// Errors raised while reading from a source or writing to a sink
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A source or target could not be opened or reached
    #[error("connection error: {0}")]
    Connection(String),

    /// A read against the source failed or returned an unexpected shape
    #[error("query error: {0}")]
    Query(String),

    /// A target schema object (keyspace, table) could not be derived or declared
    #[error("schema error for '{object}': {reason}")]
    Schema { object: String, reason: String },

    /// A single row or document could not be written
    #[error("write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    pub fn schema(object: impl Into<String>, reason: impl Into<String>) -> Self {
        MigrateError::Schema {
            object: object.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, MigrateError::Connection(_) | MigrateError::Io(_))
    }
}

impl From<rusqlite::Error> for MigrateError {
    fn from(e: rusqlite::Error) -> Self {
        MigrateError::Query(e.to_string())
    }
}

/// Result type for transfer operations
pub type Result<T> = std::result::Result<T, MigrateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = MigrateError::schema("users", "column 'id' has no cells");
        assert_eq!(
            err.to_string(),
            "schema error for 'users': column 'id' has no cells"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_connection_is_fatal() {
        assert!(MigrateError::Connection("refused".into()).is_fatal());
        assert!(!MigrateError::Write("dup".into()).is_fatal());
    }
}
