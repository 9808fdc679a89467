//! Error types for parsing and dispatching pipe expressions.

use thiserror::Error;

/// Errors produced while turning a pipe expression into call descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A step is neither `name(args)` nor a bare identifier.
    #[error("invalid pipe step '{segment}': expected `name(args)` or a bare method name")]
    InvalidStep { segment: String },

    /// An object entry has no `key: value` separator.
    #[error("invalid object entry '{entry}': expected `key: value`")]
    MissingColon { entry: String },

    /// The expression is longer than the configured limit.
    #[error("pipe expression is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// The expression has more steps than the configured limit.
    #[error("pipe expression has {count} steps, limit is {max}")]
    TooManySteps { count: usize, max: usize },
}

/// Errors produced while executing call descriptors against a target.
///
/// Every variant is fatal to the current run. Steps that completed before the
/// failure keep their effect on the target.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The expression could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The step names one of the target's baseline operations.
    #[error("method '{0}' is reserved and cannot be called from a pipe expression")]
    Reserved(String),

    /// The target has no member with this name.
    #[error("unknown method '{0}'")]
    Unknown(String),

    /// The member returned something other than the target it was called on.
    #[error("method '{0}' must return the chain object")]
    BrokenChain(String),

    /// The member itself failed.
    #[error("method '{name}' failed: {cause:#}")]
    Member { name: String, cause: anyhow::Error },
}

impl ChainError {
    /// Returns the method name the error refers to, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            ChainError::Parse(_) => None,
            ChainError::Reserved(name)
            | ChainError::Unknown(name)
            | ChainError::BrokenChain(name)
            | ChainError::Member { name, .. } => Some(name),
        }
    }
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
