//! Lenient deserializers for catalog codes.
//!
//! Catalogs exported from Rose apps write every attribute as a string
//! (`"iopl": "5"`), hand-written ones tend to use numbers (`"iopl": 5`).
//! Both spellings are accepted for the codes the resolver reads.

use crate::constants::{MAX_STASH_ITEM, MAX_STASH_SECTION};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Parse a JSON value holding an integer code, written as a number or a
/// numeric string.
pub(crate) fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a section or item code no larger than `max`.
pub(crate) fn parse_stash_code(text: &str, max: u16) -> Option<u16> {
    text.trim().parse::<u16>().ok().filter(|code| *code <= max)
}

/// Required section code, 0 to 99.
pub(crate) fn section_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    bounded_code(deserializer, MAX_STASH_SECTION)
}

/// Required item code, 0 to 999.
pub(crate) fn item_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    bounded_code(deserializer, MAX_STASH_ITEM)
}

fn bounded_code<'de, D>(deserializer: D, max: u16) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()).filter(|code| *code <= max),
        Value::String(s) => parse_stash_code(s, max),
        _ => None,
    }
    .ok_or_else(|| de::Error::custom(format!("invalid stash code {value}, expected 0 to {max}")))
}

/// Optional integer code such as `iopl` or `ilevs`.
pub(crate) fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value_as_int(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer code, found {value}"))),
    }
}

/// Optional free-text attribute, also accepting a bare number
/// (`"ilevlst": 1` is a one-level list).
pub(crate) fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, found {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Codes {
        #[serde(deserialize_with = "section_code")]
        isec: u16,
        #[serde(default, deserialize_with = "item_code")]
        item: u16,
        #[serde(default, deserialize_with = "opt_int")]
        iopl: Option<i64>,
        #[serde(default, deserialize_with = "opt_text")]
        ilevlst: Option<String>,
    }

    #[test]
    fn test_codes_accept_strings_and_numbers() {
        let codes: Codes =
            serde_json::from_value(json!({"isec": "03", "iopl": "5", "ilevlst": 1})).unwrap();
        assert_eq!(codes.isec, 3);
        assert_eq!(codes.iopl, Some(5));
        assert_eq!(codes.ilevlst.as_deref(), Some("1"));

        let codes: Codes = serde_json::from_value(json!({"isec": 30, "iopl": 2})).unwrap();
        assert_eq!(codes.isec, 30);
        assert_eq!(codes.iopl, Some(2));
        assert_eq!(codes.ilevlst, None);
    }

    #[test]
    fn test_codes_reject_garbage() {
        assert!(serde_json::from_value::<Codes>(json!({"isec": "three"})).is_err());
        assert!(serde_json::from_value::<Codes>(json!({"isec": -1})).is_err());
        assert!(serde_json::from_value::<Codes>(json!({"isec": 3, "iopl": "x"})).is_err());
        assert!(serde_json::from_value::<Codes>(json!({"isec": 3, "ilevlst": [1, 2]})).is_err());
    }

    #[test]
    fn test_codes_reject_oversize_values() {
        assert!(serde_json::from_value::<Codes>(json!({"isec": 100})).is_err());
        assert!(serde_json::from_value::<Codes>(json!({"isec": "123"})).is_err());
        assert!(serde_json::from_value::<Codes>(json!({"isec": 3, "item": 1236})).is_err());

        let codes: Codes = serde_json::from_value(json!({"isec": 99, "item": "999"})).unwrap();
        assert_eq!((codes.isec, codes.item), (99, 999));
    }

    #[test]
    fn test_parse_stash_code_bounds() {
        assert_eq!(parse_stash_code(" 99 ", 99), Some(99));
        assert_eq!(parse_stash_code("100", 99), None);
        assert_eq!(parse_stash_code("0999", 999), Some(999));
        assert_eq!(parse_stash_code("70000", 999), None);
    }

    #[test]
    fn test_value_as_int() {
        assert_eq!(value_as_int(&json!(" 7 ")), Some(7));
        assert_eq!(value_as_int(&json!(true)), None);
    }
}
