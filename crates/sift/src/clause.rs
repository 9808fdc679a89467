//! Clause types for query predicates.
//!
//! A [`Clause`] is a single filter predicate: a field name, an operator, and
//! a comparison value.

use std::cmp::Ordering;

use regex::Regex;
use sift_pipe::{parse_date_literal, Arg};

use crate::error::{Result, SiftError};
use crate::op::Op;
use crate::value::{FieldValue, Timestamp};
use crate::Number;

/// A single filter predicate.
///
/// ```
/// use sift::{Clause, FieldValue, Op};
///
/// let clause = Clause::new("name", Op::Contains, "ali");
/// assert!(clause.matches(&FieldValue::String("Alice, alias Al")));
/// ```
#[derive(Debug, Clone)]
pub struct Clause {
    pub field: String,
    pub op: Op,
    pub value: ClauseValue,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Builds a clause from a parsed pipe argument.
    ///
    /// `Op::Regex` compiles the pattern, `Op::In` expects a list, and the
    /// string operators expect text.
    pub fn from_arg(field: impl Into<String>, op: Op, arg: &Arg) -> Result<Self> {
        let value = match op {
            Op::Regex => {
                let pattern = arg.as_str().ok_or(SiftError::UnsupportedArgument {
                    op: op.as_str(),
                    kind: arg.kind(),
                })?;
                ClauseValue::Regex(Regex::new(pattern)?)
            }
            Op::In => {
                let items = arg.as_list().ok_or(SiftError::UnsupportedArgument {
                    op: op.as_str(),
                    kind: arg.kind(),
                })?;
                let set = items
                    .iter()
                    .map(|item| ClauseValue::scalar(op, item))
                    .collect::<Result<Vec<_>>>()?;
                ClauseValue::Set(set)
            }
            _ if op.is_text() && arg.as_str().is_none() => {
                return Err(SiftError::UnsupportedArgument {
                    op: op.as_str(),
                    kind: arg.kind(),
                });
            }
            _ => ClauseValue::scalar(op, arg)?,
        };

        Ok(Clause {
            field: field.into(),
            op,
            value,
        })
    }

    /// Evaluates this clause against a field value.
    ///
    /// A missing field or a type mismatch never matches, not even for `Ne`.
    pub fn matches(&self, field_value: &FieldValue<'_>) -> bool {
        if field_value.is_none() {
            return false;
        }

        match (&self.value, field_value) {
            (ClauseValue::Regex(regex), FieldValue::String(s)) => regex.is_match(s),
            (ClauseValue::Set(set), value) => {
                self.op == Op::In
                    && set
                        .iter()
                        .any(|member| member.compare_to(value) == Some(Ordering::Equal))
            }
            (ClauseValue::String(pattern), FieldValue::String(s)) if self.op.is_text() => {
                match self.op {
                    Op::StartsWith => s.starts_with(pattern.as_str()),
                    Op::EndsWith => s.ends_with(pattern.as_str()),
                    Op::Contains => s.contains(pattern.as_str()),
                    _ => false,
                }
            }
            (value, field) => value
                .compare_to(field)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
        }
    }
}

/// Owned comparison value stored in a clause.
#[derive(Debug, Clone)]
pub enum ClauseValue {
    String(String),
    Number(Number),
    Timestamp(Timestamp),
    Bool(bool),
    /// Compiled regular expression, for `Op::Regex`.
    Regex(Regex),
    /// Candidate values, for `Op::In`.
    Set(Vec<ClauseValue>),
}

impl ClauseValue {
    fn scalar(op: Op, arg: &Arg) -> Result<Self> {
        match arg {
            Arg::Bool(b) => Ok(ClauseValue::Bool(*b)),
            Arg::Number(n) => Ok(ClauseValue::Number(*n)),
            Arg::Str(s) | Arg::Bare(s) => Ok(ClauseValue::String(s.clone())),
            Arg::Timestamp(ts) => Ok(ClauseValue::Timestamp(Timestamp::from(*ts))),
            Arg::List(_) | Arg::Map(_) => Err(SiftError::UnsupportedArgument {
                op: op.as_str(),
                kind: arg.kind(),
            }),
        }
    }

    /// Orders a field value relative to this value (`field` cmp `self`).
    ///
    /// Strings holding a date literal compare against timestamps.
    fn compare_to(&self, field: &FieldValue<'_>) -> Option<Ordering> {
        match (self, field) {
            (ClauseValue::String(c), FieldValue::String(f)) => Some((*f).cmp(c.as_str())),
            (ClauseValue::Number(c), FieldValue::Number(f)) => f.compare(*c),
            (ClauseValue::Timestamp(c), FieldValue::Timestamp(f)) => Some(f.cmp(c)),
            (ClauseValue::Timestamp(c), FieldValue::String(f)) => {
                parse_date_literal(f).map(|ts| Timestamp::from(ts).cmp(c))
            }
            (ClauseValue::Bool(c), FieldValue::Bool(f)) => Some(f.cmp(c)),
            _ => None,
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

impl From<i64> for ClauseValue {
    fn from(n: i64) -> Self {
        ClauseValue::Number(Number::I64(n))
    }
}

impl From<f64> for ClauseValue {
    fn from(n: f64) -> Self {
        ClauseValue::Number(Number::F64(n))
    }
}

impl From<Timestamp> for ClauseValue {
    fn from(t: Timestamp) -> Self {
        ClauseValue::Timestamp(t)
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

impl From<Vec<ClauseValue>> for ClauseValue {
    fn from(set: Vec<ClauseValue>) -> Self {
        ClauseValue::Set(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_pipe::parse_single_argument;

    fn arg(token: &str) -> Arg {
        parse_single_argument(token).unwrap()
    }

    #[test]
    fn string_operators() {
        let s = FieldValue::String("hello world");
        assert!(Clause::new("f", Op::Eq, "hello world").matches(&s));
        assert!(Clause::new("f", Op::Ne, "hello").matches(&s));
        assert!(Clause::new("f", Op::StartsWith, "hello").matches(&s));
        assert!(Clause::new("f", Op::EndsWith, "world").matches(&s));
        assert!(Clause::new("f", Op::Contains, "o w").matches(&s));
        assert!(!Clause::new("f", Op::Contains, "xyz").matches(&s));
        assert!(Clause::new("f", Op::Lt, "zebra").matches(&s));
    }

    #[test]
    fn regex_operator() {
        let clause = Clause::from_arg("f", Op::Regex, &arg(r#""^a\d+$""#)).unwrap();
        assert!(clause.matches(&FieldValue::String("a123")));
        assert!(!clause.matches(&FieldValue::String("a12b")));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let err = Clause::from_arg("f", Op::Regex, &arg("'('")).unwrap_err();
        assert!(matches!(err, SiftError::InvalidRegex(_)));
    }

    #[test]
    fn number_operators_mixed_types() {
        let gte = Clause::from_arg("age", Op::Gte, &arg("18")).unwrap();
        assert!(gte.matches(&FieldValue::Number(Number::I64(18))));
        assert!(gte.matches(&FieldValue::Number(Number::F64(18.5))));
        assert!(!gte.matches(&FieldValue::Number(Number::U64(17))));
    }

    #[test]
    fn timestamps_against_timestamps_and_date_strings() {
        let before = Clause::from_arg("at", Op::Before, &arg("2024-01-01")).unwrap();
        let earlier = Timestamp::from(parse_date_literal("2023-06-01").unwrap());
        assert!(before.matches(&FieldValue::Timestamp(earlier)));
        assert!(before.matches(&FieldValue::String("2023-12-31T23:59:59Z")));
        assert!(!before.matches(&FieldValue::String("2024-01-01")));
        assert!(!before.matches(&FieldValue::String("not a date")));
    }

    #[test]
    fn in_operator() {
        let clause = Clause::from_arg("status", Op::In, &arg("[open, 'closed', 3]")).unwrap();
        assert!(clause.matches(&FieldValue::String("open")));
        assert!(clause.matches(&FieldValue::String("closed")));
        assert!(clause.matches(&FieldValue::Number(Number::I64(3))));
        assert!(!clause.matches(&FieldValue::String("pending")));
    }

    #[test]
    fn in_requires_a_list() {
        let err = Clause::from_arg("f", Op::In, &arg("3")).unwrap_err();
        assert!(matches!(
            err,
            SiftError::UnsupportedArgument { op: "in", kind: "number" }
        ));
    }

    #[test]
    fn text_operator_requires_text() {
        assert!(Clause::from_arg("f", Op::Contains, &arg("3")).is_err());
        assert!(Clause::from_arg("f", Op::Eq, &arg("[1]")).is_err());
    }

    #[test]
    fn bool_operators() {
        let is = Clause::from_arg("done", Op::Is, &arg("true")).unwrap();
        assert!(is.matches(&FieldValue::Bool(true)));
        assert!(!is.matches(&FieldValue::Bool(false)));
    }

    #[test]
    fn none_and_mismatch_never_match() {
        let ne = Clause::new("f", Op::Ne, "x");
        assert!(!ne.matches(&FieldValue::None));
        assert!(!ne.matches(&FieldValue::Number(Number::I64(1))));
    }
}
