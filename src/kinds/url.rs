//! URL option cell.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{Cell, Token};
use crate::error::{OptError, Result};
use crate::kinds::json_type_str;

/// A URL option.
///
/// Input is parsed and reserialized, so the stored text form is the
/// normalized rendering of whatever was supplied.
pub struct Url {
    cell: Cell<::url::Url>,
}

impl Url {
    /// Create a URL option with an initial value.
    pub fn new(value: ::url::Url) -> Self {
        Self {
            cell: Cell::new(value),
        }
    }

    /// Create a URL option from a literal.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not a valid URL.
    pub fn must_parse(text: &str) -> Self {
        match ::url::Url::parse(text) {
            Ok(value) => Self::new(value),
            Err(err) => panic!("invalid URL literal {text:?}: {err}"),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> ::url::Url {
        self.cell.get()
    }

    /// Replace the value and publish a change notification.
    pub fn store(&self, value: ::url::Url) -> Result<()> {
        self.cell.replace(value);
        Ok(())
    }

    /// Parse a URL literal and store the result.
    pub fn set(&self, text: &str) -> Result<()> {
        let value = ::url::Url::parse(text).map_err(OptError::parse)?;
        self.store(value)
    }

    /// Decode a JSON string and store it.
    ///
    /// Any non-string JSON value is rejected by type name.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        match value {
            serde_json::Value::String(s) => self.set(&s),
            other => Err(OptError::Shape {
                kind: json_type_str(&other),
            }),
        }
    }

    /// Decode a YAML string and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let s: String = serde_yaml::from_str(text)?;
        self.set(&s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.read(|value| f.write_str(value.as_str()))
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cell.read(|value| serializer.serialize_str(value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_reserialize() {
        let opt = Url::must_parse("https://example.com/path?q=1");
        assert_eq!(opt.to_string(), "https://example.com/path?q=1");
    }

    #[test]
    fn normalization_shows_in_text_form() {
        // A bare authority gains its trailing slash when reserialized.
        let opt = Url::must_parse("https://example.com");
        assert_eq!(opt.to_string(), "https://example.com/");
    }

    #[test]
    fn set_rejects_garbage() {
        let opt = Url::must_parse("https://example.com/");
        assert!(opt.set("://nope").is_err());
        assert_eq!(opt.to_string(), "https://example.com/");
    }

    #[test]
    fn json_round_trip() {
        let opt = Url::must_parse("https://example.com/a");
        let encoded = serde_json::to_string(&opt).unwrap();
        assert_eq!(encoded, "\"https://example.com/a\"");
        opt.unmarshal_json("\"https://example.org/b\"").unwrap();
        assert_eq!(opt.to_string(), "https://example.org/b");
    }

    #[test]
    fn json_rejects_non_strings() {
        let opt = Url::must_parse("https://example.com/");
        assert_eq!(
            opt.unmarshal_json("[]").unwrap_err().to_string(),
            "array invalid"
        );
    }

    #[test]
    #[should_panic(expected = "invalid URL literal")]
    fn must_parse_panics_on_garbage() {
        let _ = Url::must_parse("not a url");
    }
}
