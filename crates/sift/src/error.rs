//! Error types for the sift crate.

use thiserror::Error;

/// Errors raised while building clauses or reading member arguments.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Operator name not recognized.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Sort direction not recognized.
    #[error("unknown sort direction '{0}'")]
    UnknownDirection(String),

    /// The operator cannot compare against a value of this kind.
    #[error("operator '{op}' does not accept a {kind} value")]
    UnsupportedArgument { op: &'static str, kind: &'static str },

    /// A member was called with the wrong number of arguments.
    #[error("{member}() takes {expected} argument(s), got {got}")]
    ArgumentCount {
        member: &'static str,
        expected: &'static str,
        got: usize,
    },

    /// A member argument has the wrong kind.
    #[error("{member}() argument {position} must be {expected}, got {got}")]
    ArgumentType {
        member: &'static str,
        position: usize,
        expected: &'static str,
        got: &'static str,
    },
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
