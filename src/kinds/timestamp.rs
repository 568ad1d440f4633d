//! Timestamp option cell with RFC-3339 text form and chronological bounds.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};

use crate::core::{Cell, Token};
use crate::error::{OptError, Result};

fn parse(text: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).map_err(OptError::parse)
}

fn must(text: &str) -> DateTime<FixedOffset> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(value) => value,
        Err(err) => panic!("invalid timestamp literal {text:?}: {err}"),
    }
}

/// A timestamp option with optional chronological bounds.
///
/// Text form is RFC-3339, with or without fractional seconds; parsed
/// offsets are retained and round-trip. Bounds compare instants, not
/// renderings: storing before the lower bound fails with `too soon`, after
/// the upper bound with `too late`.
pub struct Timestamp {
    cell: Cell<DateTime<FixedOffset>>,
    bounds: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>,
}

impl Timestamp {
    /// Create an unbounded timestamp option.
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: None,
        }
    }

    /// Create a timestamp option that rejects stores outside `[min, max]`.
    pub fn bounded(
        value: DateTime<FixedOffset>,
        min: DateTime<FixedOffset>,
        max: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: Some((min, max)),
        }
    }

    /// Create an unbounded timestamp option from an RFC-3339 literal.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not valid RFC-3339.
    pub fn must_parse(text: &str) -> Self {
        Self::new(must(text))
    }

    /// Create a bounded timestamp option from RFC-3339 literals.
    ///
    /// # Panics
    ///
    /// Panics if any of the three literals is not valid RFC-3339.
    pub fn must_parse_bounded(value: &str, min: &str, max: &str) -> Self {
        Self::bounded(must(value), must(min), must(max))
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> DateTime<FixedOffset> {
        self.cell.get()
    }

    /// Validate `value` chronologically, then replace and publish.
    pub fn store(&self, value: DateTime<FixedOffset>) -> Result<()> {
        if let Some((min, max)) = &self.bounds {
            if value < *min {
                return Err(OptError::TooSoon);
            }
            if value > *max {
                return Err(OptError::TooLate);
            }
        }
        self.cell.replace(value);
        Ok(())
    }

    /// Parse an RFC-3339 literal and store the result.
    pub fn set(&self, text: &str) -> Result<()> {
        self.store(parse(text)?)
    }

    /// Decode a JSON string of the RFC-3339 form and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let s: String = serde_json::from_str(text)?;
        self.set(&s)
    }

    /// Decode a YAML string of the RFC-3339 form and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let s: String = serde_yaml::from_str(text)?;
        self.set(&s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value().to_rfc3339_opts(SecondsFormat::AutoSi, true)
        )
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
