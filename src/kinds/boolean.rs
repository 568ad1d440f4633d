//! Boolean option cell.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{Cell, Token};
use crate::error::Result;

/// A boolean option.
///
/// `Bool` doubles as a command-line flag: [`set`](Bool::set) with empty
/// text stores `true`, so a bare `--flag` occurrence switches the option on
/// without an explicit value.
pub struct Bool {
    cell: Cell<bool>,
}

impl Bool {
    /// Create a boolean option with an initial value.
    pub fn new(value: bool) -> Self {
        Self {
            cell: Cell::new(value),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> bool {
        self.cell.get()
    }

    /// Replace the value and publish a change notification.
    ///
    /// Always succeeds; booleans have no bounds to violate. The `Result`
    /// keeps the setter contract uniform across kinds.
    pub fn store(&self, value: bool) -> Result<()> {
        self.cell.replace(value);
        Ok(())
    }

    /// Parse `text` and store the result.
    ///
    /// Empty text stores `true` (flag shorthand). Non-empty text that is
    /// not a boolean literal reports success *without changing the value*.
    /// That quirk is long-standing flag-parser behavior that callers depend
    /// on; it is preserved here rather than turned into an error.
    pub fn set(&self, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.store(true);
        }
        match text.parse::<bool>() {
            Ok(value) => self.store(value),
            Err(_) => Ok(()),
        }
    }

    /// Decode a JSON boolean literal and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let value: bool = serde_json::from_str(text)?;
        self.store(value)
    }

    /// Decode a YAML boolean scalar and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let value: bool = serde_yaml::from_str(text)?;
        self.store(value)
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_means_true() {
        let opt = Bool::new(false);
        opt.set("").unwrap();
        assert!(opt.value());

        // Regardless of the prior value.
        let opt = Bool::new(true);
        opt.set("").unwrap();
        assert!(opt.value());
    }

    #[test]
    fn literals_parse() {
        let opt = Bool::new(false);
        opt.set("true").unwrap();
        assert!(opt.value());
        opt.set("false").unwrap();
        assert!(!opt.value());
    }

    #[test]
    fn garbage_text_is_a_silent_no_op() {
        let opt = Bool::new(true);
        assert!(opt.set("maybe").is_ok());
        assert!(opt.value());
    }

    #[test]
    fn json_round_trip() {
        let opt = Bool::new(false);
        opt.unmarshal_json("true").unwrap();
        assert!(opt.value());
        assert_eq!(serde_json::to_string(&opt).unwrap(), "true");
    }

    #[test]
    fn yaml_round_trip() {
        let opt = Bool::new(true);
        opt.unmarshal_yaml("false").unwrap();
        assert!(!opt.value());
        assert_eq!(serde_yaml::to_string(&opt).unwrap().trim(), "false");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let opt = Bool::new(false);
        assert!(opt.unmarshal_json("\"yes\"").is_err());
        assert!(!opt.value());
    }
}
