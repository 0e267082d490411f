use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::taxonomy::IngredientUnit;

/// The before/after value carried by an update revision.
///
/// What the value means depends on the revision's changed field, so it is
/// stored as a plain JSON scalar. Units travel as their textual name. Use
/// [`crate::IngredientUpdate::change`] or [`crate::StepUpdate::change`] for a
/// typed reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Whole numbers only; `2.5` is not an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(number) if number.fract().is_zero() => number.to_i64(),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|n| i32::try_from(n).ok())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_unit(&self) -> Option<IngredientUnit> {
        self.as_text().and_then(|text| IngredientUnit::from_str(text).ok())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<IngredientUnit> for FieldValue {
    fn from(value: IngredientUnit) -> Self {
        FieldValue::Text(value.as_str().to_string())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(text) => serializer.serialize_str(text),
            FieldValue::Flag(flag) => serializer.serialize_bool(*flag),
            FieldValue::Number(number) => decimal_to_number(number)
                .map_err(ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(FieldValue::Text(text)),
            Value::Bool(flag) => Ok(FieldValue::Flag(flag)),
            Value::Number(number) => number_to_decimal(&number)
                .map(FieldValue::Number)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a text, number or boolean value, found {}",
                other
            ))),
        }
    }
}

/// Write a decimal as a JSON number with exactly its own digits.
fn decimal_to_number(value: &Decimal) -> Result<Number, serde_json::Error> {
    Number::from_str(&value.to_string())
}

/// Read a JSON number into a decimal without going through `f64`.
fn number_to_decimal(number: &Number) -> Result<Decimal, String> {
    let text = number.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| format!("{} is not an exact decimal: {}", text, e))
}

/// `#[serde(with = ...)]` adapter for optional exact decimals such as `quantity`.
pub(crate) mod exact_decimal {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(number) => decimal_to_number(number)
                .map_err(ser::Error::custom)?
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number_to_decimal(&number)
                .map(Some)
                .map_err(de::Error::custom),
            Some(other) => Err(de::Error::custom(format!("expected a number, found {}", other))),
        }
    }
}
