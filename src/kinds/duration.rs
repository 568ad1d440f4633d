//! Duration option cell with unit-suffixed text form.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{Bounds, Cell, Token};
use crate::error::{OptError, Result};

fn render(value: &std::time::Duration) -> String {
    humantime::format_duration(*value).to_string()
}

/// A duration option with optional inclusive bounds.
///
/// The text form is unit-suffixed (`5m`, `1h 30m`, `250ms`); JSON and YAML
/// carry that text as a string.
pub struct Duration {
    cell: Cell<std::time::Duration>,
    bounds: Option<Bounds<std::time::Duration>>,
}

impl Duration {
    /// Create an unbounded duration option.
    pub fn new(value: std::time::Duration) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: None,
        }
    }

    /// Create a duration option that rejects stores outside `[min, max]`.
    pub fn bounded(
        value: std::time::Duration,
        min: std::time::Duration,
        max: std::time::Duration,
    ) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: Some(Bounds { min, max }),
        }
    }

    /// Create an unbounded duration option from a literal.
    ///
    /// Intended for defaults known to be valid at initialization time.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not a valid duration literal.
    pub fn must_parse(text: &str) -> Self {
        match humantime::parse_duration(text) {
            Ok(value) => Self::new(value),
            Err(err) => panic!("invalid duration literal {text:?}: {err}"),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> std::time::Duration {
        self.cell.get()
    }

    /// Validate `value` against the bounds, then replace and publish.
    pub fn store(&self, value: std::time::Duration) -> Result<()> {
        if let Some(bounds) = &self.bounds {
            bounds.check_with(&value, render)?;
        }
        self.cell.replace(value);
        Ok(())
    }

    /// Parse a unit-suffixed duration literal and store the result.
    pub fn set(&self, text: &str) -> Result<()> {
        let value = humantime::parse_duration(text).map_err(OptError::parse)?;
        self.store(value)
    }

    /// Decode a JSON string of the text form and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let s: String = serde_json::from_str(text)?;
        self.set(&s)
    }

    /// Decode a YAML string of the text form and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let s: String = serde_yaml::from_str(text)?;
        self.set(&s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.value()))
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
