//! Error types for the transact key-value store.

use std::io;

use thiserror::Error;

/// The result type used throughout transact.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for transact operations.
///
/// Variants fall into three groups: malformed user input, logical/state
/// errors raised by the transaction manager, and persistence failures.
/// None of them is fatal to the interactive loop.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A snapshot file could be read but does not hold a valid store.
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// The requested key was not found in the active store.
    #[error("Not found")]
    NotFound(String),

    /// An invalid argument or option was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input line held no tokens.
    #[error("Empty input")]
    EmptyInput,

    /// The first token is not a known operation.
    #[error("Unknown operation")]
    UnknownOperation(String),

    /// The operation was given fewer arguments than it needs.
    #[error("Insufficient arguments")]
    InsufficientArguments {
        /// The operation name.
        operation: &'static str,
        /// The number of arguments the operation requires.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// COMMIT or ROLLBACK was issued with no open scope.
    #[error("No transactions to {0}")]
    NoTransaction(&'static str),
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Creates a new not found error for `key`.
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound(key.into())
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Returns true for errors caused by the request itself (bad input or
    /// an operation that is illegal in the current state), as opposed to
    /// persistence failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::EmptyInput
                | Error::UnknownOperation(_)
                | Error::InsufficientArguments { .. }
                | Error::NoTransaction(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::NoTransaction("commit").to_string(), "No transactions to commit");
        assert_eq!(Error::not_found("k").to_string(), "Not found");
        assert_eq!(
            Error::InsufficientArguments { operation: "SET", expected: 2, actual: 1 }.to_string(),
            "Insufficient arguments"
        );
        assert_eq!(Error::corruption("bad file").to_string(), "Data corruption: bad file");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_user_errors() {
        assert!(Error::EmptyInput.is_user_error());
        assert!(Error::UnknownOperation("FOO".into()).is_user_error());
        assert!(Error::NoTransaction("rollback").is_user_error());
        assert!(!Error::Serialization("x".into()).is_user_error());
    }
}
