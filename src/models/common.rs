//! Value normalization shared by all Freshdesk models.
//!
//! Freshdesk identifiers and choice codes arrive as either JSON numbers or
//! numeric strings depending on the endpoint. Everything is normalized to a
//! positive `u64` here so models only ever store numbers.

use serde::Deserializer;
use serde_json::Value;

use crate::error::FreshdeskError;

/// A value that can be normalized into a numeric identifier or code.
///
/// Implemented for integers, numeric strings and JSON values. Zero, negative
/// numbers and non-numeric strings do not normalize.
pub trait Numeric {
    /// Returns the normalized value, or `None` if it is not a positive integer.
    fn to_numeric(&self) -> Option<u64>;
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(impl Numeric for $t {
            fn to_numeric(&self) -> Option<u64> {
                u64::try_from(*self).ok().filter(|n| *n > 0)
            }
        })*
    };
}

impl_numeric_int!(u32, u64, usize, i32, i64);

impl Numeric for str {
    fn to_numeric(&self) -> Option<u64> {
        parse_numeric_str(self)
    }
}

impl Numeric for String {
    fn to_numeric(&self) -> Option<u64> {
        parse_numeric_str(self)
    }
}

impl Numeric for Value {
    fn to_numeric(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().and_then(integral_f64))
                .filter(|n| *n > 0),
            Value::String(s) => parse_numeric_str(s),
            _ => None,
        }
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_numeric(&self) -> Option<u64> {
        (**self).to_numeric()
    }
}

fn integral_f64(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Some(value as u64)
    } else {
        None
    }
}

fn parse_numeric_str(value: &str) -> Option<u64> {
    let value = value.trim();
    value
        .parse::<u64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().and_then(integral_f64))
        .filter(|n| *n > 0)
}

/// Normalizes `value` to a numeric identifier, failing with `message` otherwise.
pub fn normalize_id(value: impl Numeric, message: &str) -> Result<u64, FreshdeskError> {
    value
        .to_numeric()
        .ok_or_else(|| FreshdeskError::validation(message))
}

/// Requires a non-blank string.
pub fn require_text(value: impl Into<String>, message: &str) -> Result<String, FreshdeskError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(FreshdeskError::validation(message));
    }
    Ok(value)
}

/// Reads a JSON string or number as text, as the API mixes both for free-text fields.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns `raw[key]` unless it is absent, null or otherwise falsy.
///
/// `from_json` implementations only assign fields that carry a value.
pub fn present<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| is_truthy(v))
}

/// False for null, `false`, `""` and zero; true for everything else.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

/// Deserializes an optional identifier that can be a string or a number into `Option<u64>`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct OptionalIdVisitor;

    impl<'de> Visitor<'de> for OptionalIdVisitor {
        type Value = Option<u64>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("null, a numeric string, or a positive integer")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_numeric_str(value)
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .to_numeric()
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            value
                .to_numeric()
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            integral_f64(value)
                .map(Some)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }

    deserializer.deserialize_option(OptionalIdVisitor)
}
