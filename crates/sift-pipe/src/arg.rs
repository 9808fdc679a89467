//! Parsed argument values.
//!
//! Every textual argument in a pipe expression becomes exactly one [`Arg`].
//! The variants mirror the argument grammar: booleans, numbers, quoted
//! strings, calendar timestamps, lists, maps, and a bare-string fallback.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::split::{reads_back_quoted, stays_quoted};

/// A parsed argument value.
///
/// ```
/// use sift_pipe::{parse_single_argument, Arg, Number};
///
/// assert_eq!(parse_single_argument("42").unwrap(), Arg::Number(Number::I64(42)));
/// assert_eq!(parse_single_argument("'hi'").unwrap(), Arg::Str("hi".into()));
/// assert_eq!(parse_single_argument("age").unwrap(), Arg::Bare("age".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Arg {
    /// `true` or `false`.
    Bool(bool),
    /// A finite number.
    Number(Number),
    /// Contents of a quoted string, escapes kept as written.
    Str(String),
    /// A calendar date or date-time, normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// `[a, b, ...]`
    List(Vec<Arg>),
    /// `{key: value, ...}`
    Map(BTreeMap<String, Arg>),
    /// An unquoted token that matched no other rule.
    Bare(String),
}

impl Arg {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Bool(_) => "bool",
            Arg::Number(_) => "number",
            Arg::Str(_) => "string",
            Arg::Timestamp(_) => "timestamp",
            Arg::List(_) => "list",
            Arg::Map(_) => "map",
            Arg::Bare(_) => "bare word",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Arg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Arg::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text of a quoted string or a bare word.
    ///
    /// Both read the same to most members: `sort_by(age)` and
    /// `sort_by("age")` name the same field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) | Arg::Bare(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Arg::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Arg]> {
        match self {
            Arg::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Arg>> {
        match self {
            Arg::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Renders the canonical textual form.
///
/// Parsing the output yields an equal value for every `Arg` parsed from a
/// balanced token. Strings take whichever quote keeps them closed, `"`
/// first, or else the quote they were written with. A string that reads
/// back under neither quote only comes from an unterminated token and is
/// rendered with `"` as is.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Bool(b) => write!(f, "{b}"),
            Arg::Number(n) => write!(f, "{n}"),
            Arg::Str(s) => {
                let quote = quote_for(s);
                write!(f, "{quote}{s}{quote}")
            }
            Arg::Timestamp(ts) => {
                write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Arg::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Arg::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if crate::parse::is_identifier(key) {
                        write!(f, "{key}: {value}")?;
                    } else {
                        let quote = quote_for(key);
                        write!(f, "{quote}{key}{quote}: {value}")?;
                    }
                }
                f.write_str("}")
            }
            Arg::Bare(s) => f.write_str(s),
        }
    }
}

fn quote_for(text: &str) -> char {
    const QUOTES: [char; 2] = ['"', '\''];
    QUOTES
        .into_iter()
        .find(|&q| stays_quoted(text, q))
        .or_else(|| QUOTES.into_iter().find(|&q| reads_back_quoted(text, q)))
        .unwrap_or('"')
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Number(Number::I64(n))
    }
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Arg::Number(Number::F64(n))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<DateTime<Utc>> for Arg {
    fn from(ts: DateTime<Utc>) -> Self {
        Arg::Timestamp(ts)
    }
}

impl From<Vec<Arg>> for Arg {
    fn from(items: Vec<Arg>) -> Self {
        Arg::List(items)
    }
}

/// Numeric value.
///
/// Integer literals stay integers when they fit in `i64` (or `u64` for large
/// positive values); everything else is stored as `f64`. Comparisons across
/// variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer, only for values above `i64::MAX`.
    U64(u64),
    /// 64-bit floating point, always finite when produced by the parser.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns the value as `u64` if it is a non-negative whole number.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Number::I64(n) => u64::try_from(n).ok(),
            Number::U64(n) => Some(n),
            Number::F64(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
                Some(n as u64)
            }
            Number::F64(_) => None,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            // Debug keeps the fractional part (`3.0`), so the text reads back as a float.
            Number::F64(n) => write!(f, "{n:?}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => Number::I64(n),
            Err(_) => Number::U64(n),
        }
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::from(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::parse::parse_single_argument;

    #[test]
    fn kind_names() {
        assert_eq!(Arg::Bool(true).kind(), "bool");
        assert_eq!(Arg::from(1i64).kind(), "number");
        assert_eq!(Arg::from("x").kind(), "string");
        assert_eq!(Arg::List(vec![]).kind(), "list");
        assert_eq!(Arg::Map(BTreeMap::new()).kind(), "map");
        assert_eq!(Arg::Bare("x".into()).kind(), "bare word");
    }

    #[test]
    fn extractors() {
        assert_eq!(Arg::Bool(false).as_bool(), Some(false));
        assert_eq!(Arg::from(7i64).as_number(), Some(Number::I64(7)));
        assert_eq!(Arg::Str("a".into()).as_str(), Some("a"));
        assert_eq!(Arg::Bare("b".into()).as_str(), Some("b"));
        assert_eq!(Arg::from(7i64).as_str(), None);
        assert_eq!(Arg::Bool(true).as_list(), None);
    }

    #[test]
    fn display_canonical_forms() {
        assert_eq!(Arg::from(3.0).to_string(), "3.0");
        assert_eq!(Arg::from(-12i64).to_string(), "-12");
        assert_eq!(Arg::from("plain").to_string(), "\"plain\"");
        assert_eq!(Arg::from("say \"hi\"").to_string(), "'say \"hi\"'");
        assert_eq!(Arg::from(r#"a\"b"#).to_string(), r#""a\"b""#);

        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(Arg::from(ts).to_string(), "2024-01-15T10:30:00Z");

        let list = Arg::List(vec![Arg::from(1i64), Arg::from("x")]);
        assert_eq!(list.to_string(), "[1, \"x\"]");

        let mut map = BTreeMap::new();
        map.insert("name".to_string(), Arg::from("bob"));
        map.insert("two words".to_string(), Arg::Bool(true));
        assert_eq!(
            Arg::Map(map).to_string(),
            "{name: \"bob\", \"two words\": true}"
        );
    }

    #[test]
    fn mixed_quotes_render_back_to_the_same_list() {
        let parsed = parse_single_argument(r#"['a"b\'c', 1]"#).unwrap();
        assert_eq!(
            parsed,
            Arg::List(vec![Arg::Str(r#"a"b\'c"#.into()), Arg::from(1i64)])
        );
        let rendered = parsed.to_string();
        assert_eq!(rendered, r#"['a"b\'c', 1]"#);
        assert_eq!(parse_single_argument(&rendered).unwrap(), parsed);
    }

    #[test]
    fn string_closed_under_neither_quote_keeps_its_own() {
        let parsed = parse_single_argument(r#"['a' "x" 'b', 2]"#).unwrap();
        assert_eq!(parsed.as_list().map(|items| items.len()), Some(2));
        assert_eq!(parse_single_argument(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn map_keys_with_quotes_render_back() {
        let parsed = parse_single_argument(r#"{'say "hi"': 1, b: 2}"#).unwrap();
        assert_eq!(parse_single_argument(&parsed.to_string()).unwrap(), parsed);
    }

    #[test]
    fn number_mixed_comparison() {
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(u64::MAX).compare(Number::I64(1)),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::I64(1)), None);
    }

    #[test]
    fn number_as_u64() {
        assert_eq!(Number::I64(3).as_u64(), Some(3));
        assert_eq!(Number::I64(-3).as_u64(), None);
        assert_eq!(Number::F64(4.0).as_u64(), Some(4));
        assert_eq!(Number::F64(4.5).as_u64(), None);
        assert_eq!(Number::from(u64::MAX), Number::U64(u64::MAX));
    }
}
