//! Custom serde helpers for CoinSpot's number formats.
//!
//! CoinSpot sends and expects amounts as plain JSON numbers, occasionally as
//! strings. `serde_json` is built with `arbitrary_precision`, so numbers keep
//! their exact textual form and convert to [`Decimal`] without going through
//! `f64`.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::{Number, Value};

/// Parse a decimal written either in plain or scientific notation.
pub fn parse_decimal(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("invalid decimal {text:?}: {e}"))
}

/// Convert a JSON number or numeric string into a [`Decimal`].
///
/// # Example
///
/// ```rust
/// use coinspot_api_client::types::serde_helpers::decimal_from_value;
///
/// let value: serde_json::Value = serde_json::from_str("0.00012345").unwrap();
/// assert_eq!(decimal_from_value(&value).unwrap().to_string(), "0.00012345");
/// ```
pub fn decimal_from_value(value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        other => Err(format!("expected a number, got {other}")),
    }
}

/// Serialize/deserialize a [`Decimal`] as a JSON number.
///
/// Deserialization also accepts numeric strings.
///
/// # Example
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use rust_decimal::Decimal;
/// use coinspot_api_client::types::serde_helpers::json_decimal;
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct Quote {
///     #[serde(with = "json_decimal")]
///     rate: Decimal,
/// }
///
/// let quote = Quote { rate: Decimal::new(4150025, 2) };
/// assert_eq!(serde_json::to_string(&quote).unwrap(), r#"{"rate":41500.25}"#);
///
/// let parsed: Quote = serde_json::from_str(r#"{"rate":"41500.25"}"#).unwrap();
/// assert_eq!(parsed.rate, quote.rate);
/// ```
pub mod json_decimal {
    use super::*;

    /// Serialize a decimal as a JSON number.
    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number = Number::from_str(&value.to_string()).map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }

    /// Deserialize a decimal from a JSON number or numeric string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value).map_err(de::Error::custom)
    }
}

/// Deserialize an optional [`Decimal`]; `null` becomes `None`.
///
/// Combine with `#[serde(default)]` so a missing field is also `None`.
pub mod option_json_decimal {
    use super::*;

    /// Deserialize from a JSON number, numeric string or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => decimal_from_value(&value).map(Some).map_err(de::Error::custom),
        }
    }
}

/// Deserialize a map of decimals keyed by coin symbol.
///
/// Keys are lower-cased, so lookups by symbol are case-insensitive for
/// callers that normalize their own input. An empty JSON array or `null`
/// reads as an empty map, and `null` entries are skipped.
pub mod json_decimal_map {
    use super::*;

    /// Deserialize a JSON object of numbers.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<String, Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            Value::Null => return Ok(HashMap::new()),
            Value::Array(items) if items.is_empty() => return Ok(HashMap::new()),
            other => {
                return Err(de::Error::custom(format!(
                    "expected a map of numbers, got {other}"
                )));
            }
        };
        raw.into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                decimal_from_value(&value)
                    .map(|decimal| (key.to_ascii_lowercase(), decimal))
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}

/// Deserialize an identifier that may be sent as a string or a number.
pub mod string_or_number {
    use super::*;

    /// Deserialize into a `String`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        identifier(Value::deserialize(deserializer)?).map_err(de::Error::custom)
    }

    /// Deserialize into an `Option<String>`; `null` becomes `None`.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => identifier(value).map(Some).map_err(de::Error::custom),
        }
    }

    fn identifier(value: Value) -> Result<String, String> {
        match value {
            Value::String(text) => Ok(text),
            Value::Number(number) => Ok(number.to_string()),
            other => Err(format!("expected a string or number, got {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Balances {
        #[serde(deserialize_with = "json_decimal_map::deserialize")]
        balance: HashMap<String, Decimal>,
    }

    #[test]
    fn test_decimal_keeps_precision() {
        let value: Value = serde_json::from_str("0.123456789012345678").unwrap();
        let decimal = decimal_from_value(&value).unwrap();
        assert_eq!(decimal.to_string(), "0.123456789012345678");
    }

    #[test]
    fn test_decimal_scientific_notation() {
        let value: Value = serde_json::from_str("1e-7").unwrap();
        let decimal = decimal_from_value(&value).unwrap();
        assert_eq!(decimal, Decimal::new(1, 7));
    }

    #[test]
    fn test_decimal_rejects_non_numbers() {
        assert!(decimal_from_value(&Value::Bool(true)).is_err());
        assert!(decimal_from_value(&Value::String("abc".into())).is_err());
    }

    #[test]
    fn test_decimal_map_lowercases_keys() {
        let json = r#"{"balance":{"BTC":0.5,"aud":"120.10"}}"#;
        let parsed: Balances = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.balance["btc"], Decimal::new(5, 1));
        assert_eq!(parsed.balance["aud"], Decimal::new(12010, 2));
    }

    #[test]
    fn test_decimal_map_accepts_empty_array() {
        let parsed: Balances = serde_json::from_str(r#"{"balance":[]}"#).unwrap();
        assert!(parsed.balance.is_empty());
    }

    #[test]
    fn test_decimal_map_skips_null_entries() {
        let json = r#"{"balance":{"btc":null,"eth":"2"}}"#;
        let parsed: Balances = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.balance.len(), 1);
        assert_eq!(parsed.balance["eth"], Decimal::new(2, 0));
    }

    #[test]
    fn test_decimal_map_rejects_non_empty_array() {
        let result = serde_json::from_str::<Balances>(r#"{"balance":[1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_decimal_keeps_scale_on_serialize() {
        #[derive(serde::Serialize)]
        struct Amount {
            #[serde(with = "json_decimal")]
            amount: Decimal,
        }

        let json = serde_json::to_string(&Amount {
            amount: Decimal::new(150, 2),
        })
        .unwrap();
        assert_eq!(json, r#"{"amount":1.50}"#);
    }
}
