//! Comparison operators for clauses.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::SiftError;

/// Comparison operator for a clause.
///
/// - **Universal**: `Eq`, `Ne`
/// - **String**: `StartsWith`, `EndsWith`, `Contains`, `Regex`
/// - **Ordering**: `Gt`, `Gte`, `Lt`, `Lte` (numbers, timestamps, strings)
/// - **Timestamp aliases**: `Before` (`Lt`), `After` (`Gt`)
/// - **Membership**: `In`
/// - **Bool alias**: `Is` (`Eq`)
///
/// Operators parse from their names or symbols, which is how pipe
/// expressions spell them:
///
/// ```
/// use sift::Op;
///
/// assert_eq!("gte".parse::<Op>().unwrap(), Op::Gte);
/// assert_eq!(">=".parse::<Op>().unwrap(), Op::Gte);
/// assert!("~~".parse::<Op>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Eq,
    Ne,
    StartsWith,
    EndsWith,
    Contains,
    Regex,
    Gt,
    Gte,
    Lt,
    Lte,
    Before,
    After,
    In,
    Is,
}

impl Op {
    /// Maps aliases to their canonical form.
    ///
    /// - `Before` -> `Lt`
    /// - `After` -> `Gt`
    /// - `Is` -> `Eq`
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            Op::Is => Op::Eq,
            other => other,
        }
    }

    /// Returns `true` for operators decided by an [`Ordering`].
    pub fn is_ordering(self) -> bool {
        matches!(
            self.normalize(),
            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte
        )
    }

    /// Returns `true` for operators that only apply to strings.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex
        )
    }

    /// Evaluates an ordering-based operator.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "regex",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::Before => "before",
            Op::After => "after",
            Op::In => "in",
            Op::Is => "is",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Op {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim().to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Op::Eq,
            "ne" | "!=" | "<>" => Op::Ne,
            "startswith" | "starts_with" => Op::StartsWith,
            "endswith" | "ends_with" => Op::EndsWith,
            "contains" => Op::Contains,
            "regex" | "matches" | "~" => Op::Regex,
            "gt" | ">" => Op::Gt,
            "gte" | ">=" => Op::Gte,
            "lt" | "<" => Op::Lt,
            "lte" | "<=" => Op::Lte,
            "before" => Op::Before,
            "after" => Op::After,
            "in" => Op::In,
            "is" => Op::Is,
            _ => return Err(SiftError::UnknownOperator(s.to_string())),
        };
        Ok(op)
    }
}
