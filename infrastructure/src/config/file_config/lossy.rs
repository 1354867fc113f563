//! Lenient scalar deserialization.
//!
//! Config files and CLI overrides may carry typed values
//! (`minimum-approvals = 2`, `--polling-interval-seconds 5`), while action
//! inputs are always text. These helpers accept any scalar and hand it
//! back as a string.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

/// Deserialize any scalar as a `String`.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(ScalarVisitor)
}

/// Deserialize any scalar as `Some(String)`; blank text becomes `None`.
pub fn opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = deserializer.deserialize_any(ScalarVisitor)?;
    Ok(Some(value).filter(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::string")]
        text: String,
        #[serde(default, deserialize_with = "super::opt_string")]
        maybe: Option<String>,
    }

    fn parse(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_scalars_become_strings() {
        assert_eq!(parse(r#"{"text": 2}"#).text, "2");
        assert_eq!(parse(r#"{"text": true}"#).text, "true");
        assert_eq!(parse(r#"{"text": "yes"}"#).text, "yes");
        assert_eq!(parse(r#"{"text": -3}"#).text, "-3");
    }

    #[test]
    fn test_blank_optional_is_none() {
        assert_eq!(parse(r#"{"maybe": "  "}"#).maybe, None);
        assert_eq!(parse(r#"{"maybe": 12}"#).maybe.as_deref(), Some("12"));
        assert_eq!(parse(r#"{}"#).maybe, None);
    }
}
