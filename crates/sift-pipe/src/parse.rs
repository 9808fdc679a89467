//! Value parser and pipe-expression parser.
//!
//! Argument tokens go through a fixed rule cascade; the first rule that
//! matches decides the [`Arg`] variant:
//!
//! 1. `true` / `false`
//! 2. a finite number
//! 3. a single- or double-quoted string
//! 4. a date or date-time literal
//! 5. `[ ... ]` list
//! 6. `{ ... }` map
//! 7. anything else, kept as a bare word
//!
//! Numbers are tried before dates, so `2024` is always a number.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::arg::{Arg, Number};
use crate::call::Call;
use crate::error::{ParseError, Result};
use crate::options::ParseOptions;
use crate::split::{is_balanced, split_arguments, split_top_level};

static METHOD_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)$").expect("method call pattern is valid")
});

/// Zone-less date-time layouts, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a pipe expression into call descriptors, in execution order.
///
/// Blank steps are skipped. Uses [`ParseOptions::default`], which imposes no
/// limits.
///
/// ```
/// use sift_pipe::{parse_pipe_expression, Arg};
///
/// let calls = parse_pipe_expression(r#"adult(18) | | sort_by("age")"#).unwrap();
/// assert_eq!(calls.len(), 2);
/// assert_eq!(calls[0].name, "adult");
/// assert_eq!(calls[1].args, vec![Arg::Str("age".into())]);
/// ```
pub fn parse_pipe_expression(expression: &str) -> Result<Vec<Call>> {
    parse_pipe_expression_with(expression, &ParseOptions::default())
}

/// Parses a pipe expression, enforcing the limits in `options`.
pub fn parse_pipe_expression_with(expression: &str, options: &ParseOptions) -> Result<Vec<Call>> {
    options.check_length(expression)?;

    let segments = split_top_level(expression, '|');
    options.check_steps(segments.len())?;

    segments
        .iter()
        .map(|segment| {
            let call = parse_method_call(segment)?;
            trace!(method = %call.name, args = call.args.len(), "parsed pipe step");
            Ok(call)
        })
        .collect()
}

/// Parses one `name(args)` step, or a bare `name` with no arguments.
///
/// A step with an unclosed bracket or string is an
/// [`InvalidStep`](ParseError::InvalidStep), so a stray `(` or quote can
/// never hide the steps that follow it.
pub fn parse_method_call(segment: &str) -> Result<Call> {
    let segment = segment.trim();

    if !is_balanced(segment) {
        return Err(ParseError::InvalidStep {
            segment: segment.to_string(),
        });
    }

    if let Some(caps) = METHOD_CALL.captures(segment) {
        let args = parse_list_content(&caps[2])?;
        return Ok(Call::new(&caps[1], args));
    }

    if is_identifier(segment) {
        return Ok(Call::new(segment, Vec::new()));
    }

    Err(ParseError::InvalidStep {
        segment: segment.to_string(),
    })
}

/// Parses a single argument token.
///
/// Fails only when a map inside the token has an entry without `:`.
pub fn parse_single_argument(token: &str) -> Result<Arg> {
    let token = token.trim();

    match token {
        "true" => return Ok(Arg::Bool(true)),
        "false" => return Ok(Arg::Bool(false)),
        _ => {}
    }

    if let Some(n) = parse_number(token) {
        return Ok(Arg::Number(n));
    }

    if let Some(content) = strip_quotes(token) {
        return Ok(Arg::Str(content.to_string()));
    }

    if let Some(ts) = parse_date_literal(token) {
        return Ok(Arg::Timestamp(ts));
    }

    if token.starts_with('[') && token.ends_with(']') {
        return parse_array(token).map(Arg::List);
    }

    if token.starts_with('{') && token.ends_with('}') {
        return parse_object(token).map(Arg::Map);
    }

    Ok(Arg::Bare(token.to_string()))
}

/// Parses a bracketed list token such as `[1, "a", [2]]`.
pub fn parse_array(token: &str) -> Result<Vec<Arg>> {
    let token = token.trim();
    let inner = token
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(token);
    parse_list_content(inner)
}

/// Parses a braced map token such as `{name: "bob", "max age": 40}`.
///
/// The key is the text before the first `:`; everything after it is the
/// value, so `{at: 10:30}` maps `at` to the bare word `10:30`. A repeated
/// key keeps its last value.
pub fn parse_object(token: &str) -> Result<BTreeMap<String, Arg>> {
    let token = token.trim();
    let inner = token
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(token);

    let mut map = BTreeMap::new();
    for entry in split_arguments(inner) {
        let Some((key, value)) = entry.split_once(':') else {
            return Err(ParseError::MissingColon {
                entry: entry.clone(),
            });
        };
        let key = key.trim();
        let key = strip_quotes(key).unwrap_or(key);
        map.insert(key.to_string(), parse_single_argument(value)?);
    }
    Ok(map)
}

/// Returns `true` if `s` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_list_content(content: &str) -> Result<Vec<Arg>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_arguments(content)
        .iter()
        .map(|piece| parse_single_argument(piece))
        .collect()
}

/// Converts the whole token to a finite number.
///
/// Accepts decimal integers, `0x`/`0o`/`0b` prefixed integers, and decimal
/// or exponent floats. `inf` and `NaN` are not numbers here.
fn parse_number(token: &str) -> Option<Number> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(Number::I64(n));
    }
    if let Ok(n) = token.parse::<u64>() {
        return Some(Number::U64(n));
    }

    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .iter()
        .find_map(|(prefix, radix)| token.strip_prefix(prefix).map(|digits| (digits, *radix)));
    if let Some((digits, radix)) = radix {
        if digits.starts_with(|c: char| c == '+' || c == '-') {
            return None;
        }
        return u64::from_str_radix(digits, radix).ok().map(Number::from);
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Number::F64)
}

fn strip_quotes(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if token.len() >= 2 && (first == '"' || first == '\'') && token.ends_with(first) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Parses a date or date-time literal, normalized to UTC.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD`, and `YYYY-MM-DD[T ]HH:MM[:SS[.f]]`.
/// Date-only and zone-less inputs are read as UTC.
pub fn parse_date_literal(token: &str) -> Option<DateTime<Utc>> {
    let token = token.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(token) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(token, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
