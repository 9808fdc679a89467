//! Field values read from collection items.
//!
//! A [`FieldValue`] is what a [`Record`](crate::Record) (or an accessor
//! closure) hands back for a field name. It borrows strings from the item, so
//! reading a field never allocates.

use chrono::{DateTime, TimeZone, Utc};

use crate::Number;

/// The value of one field of one item.
///
/// ```
/// use sift::{FieldValue, Number};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// fn accessor<'a>(person: &'a Person, field: &str) -> FieldValue<'a> {
///     match field {
///         "name" => FieldValue::String(&person.name),
///         "age" => FieldValue::Number(Number::from(person.age as u32)),
///         _ => FieldValue::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field missing, null, or not comparable.
    None,
}

impl<'a> FieldValue<'a> {
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            FieldValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Number(_) => "number",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Bool(_) => "bool",
            FieldValue::None => "none",
        }
    }
}

/// Timestamp represented as milliseconds since the Unix epoch.
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Saturates at the ends of the `i64` millisecond range.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }

    /// Converts to a UTC date-time, if the value is within chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_secs_saturates() {
        assert_eq!(Timestamp::from_secs(-3).as_millis(), -3000);
        assert_eq!(Timestamp::from_secs(i64::MAX), Timestamp(i64::MAX));
        assert_eq!(Timestamp::from_secs(i64::MIN), Timestamp(i64::MIN));
    }

    #[test]
    fn extractors() {
        assert_eq!(FieldValue::String("hi").as_str(), Some("hi"));
        assert_eq!(
            FieldValue::Number(Number::I64(4)).as_number(),
            Some(Number::I64(4))
        );
        assert_eq!(
            FieldValue::Timestamp(Timestamp(9)).as_timestamp(),
            Some(Timestamp(9))
        );
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::String("x").as_number(), None);
        assert!(FieldValue::None.is_none());
    }

    #[test]
    fn kinds() {
        assert_eq!(FieldValue::String("x").kind(), "string");
        assert_eq!(FieldValue::None.kind(), "none");
    }

    #[test]
    fn timestamp_from_datetime() {
        let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(Timestamp::from(dt), Timestamp(1000));
        assert_eq!(Timestamp(1000).to_datetime(), Some(dt));
    }
}
