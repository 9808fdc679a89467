//! Parse limits.
//!
//! Parsing and dispatch have no internal preemption point, so callers that
//! accept expressions from untrusted input bound them here.

use crate::error::{ParseError, Result};

/// Limits applied when parsing a pipe expression.
///
/// The default imposes no limits.
///
/// ```
/// use sift_pipe::{parse_pipe_expression_with, ParseOptions};
///
/// let options = ParseOptions::new().max_expression_len(64).max_steps(2);
/// assert!(parse_pipe_expression_with("a() | b()", &options).is_ok());
/// assert!(parse_pipe_expression_with("a() | b() | c()", &options).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    max_expression_len: Option<usize>,
    max_steps: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        ParseOptions::default()
    }

    /// Rejects expressions longer than `len` bytes.
    pub fn max_expression_len(mut self, len: usize) -> Self {
        self.max_expression_len = Some(len);
        self
    }

    /// Rejects expressions with more than `steps` non-blank steps.
    pub fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn get_max_expression_len(&self) -> Option<usize> {
        self.max_expression_len
    }

    pub fn get_max_steps(&self) -> Option<usize> {
        self.max_steps
    }

    pub(crate) fn check_length(&self, expression: &str) -> Result<()> {
        match self.max_expression_len {
            Some(max) if expression.len() > max => Err(ParseError::TooLong {
                len: expression.len(),
                max,
            }),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_steps(&self, count: usize) -> Result<()> {
        match self.max_steps {
            Some(max) if count > max => Err(ParseError::TooManySteps { count, max }),
            _ => Ok(()),
        }
    }
}
