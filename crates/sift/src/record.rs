//! Field access for collection items.

use serde_json::Value as Json;

use crate::value::FieldValue;
use crate::Number;

/// Items that expose named fields to queries and query members.
///
/// # Manual Implementation
///
/// ```
/// use sift::{FieldValue, Number, Record};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl Record for Task {
///     fn field(&self, name: &str) -> FieldValue<'_> {
///         match name {
///             "name" => FieldValue::String(&self.name),
///             "priority" => FieldValue::Number(Number::from(self.priority as u32)),
///             _ => FieldValue::None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`FieldValue::None`] if the field
    /// doesn't exist or is not comparable.
    fn field(&self, name: &str) -> FieldValue<'_>;

    /// Accessor function suitable for
    /// [`compare_by_orderings`](crate::compare_by_orderings).
    fn accessor<'a>(item: &'a Self, name: &str) -> FieldValue<'a>
    where
        Self: Sized,
    {
        item.field(name)
    }
}

/// JSON records resolve dotted paths (`address.city`) and array indexes
/// (`tags.0`). Nulls, arrays and objects read as [`FieldValue::None`].
impl Record for Json {
    fn field(&self, name: &str) -> FieldValue<'_> {
        let mut current = self;
        for segment in name.split('.') {
            let next = match current {
                Json::Object(map) => map.get(segment),
                Json::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return FieldValue::None,
            }
        }

        match current {
            Json::String(s) => FieldValue::String(s),
            Json::Bool(b) => FieldValue::Bool(*b),
            Json::Number(n) => json_number(n).map_or(FieldValue::None, FieldValue::Number),
            Json::Null | Json::Array(_) | Json::Object(_) => FieldValue::None,
        }
    }
}

fn json_number(n: &serde_json::Number) -> Option<Number> {
    if let Some(i) = n.as_i64() {
        Some(Number::I64(i))
    } else if let Some(u) = n.as_u64() {
        Some(Number::U64(u))
    } else {
        n.as_f64().map(Number::F64)
    }
}
