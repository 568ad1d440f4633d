//! String option cells, scalar and sequence.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{Cell, Token};
use crate::error::{OptError, Result};

/// A string option, optionally restricted to an allow-list of values.
pub struct Text {
    cell: Cell<String>,
    allowed: Vec<String>,
}

impl Text {
    /// Create an unrestricted string option.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            cell: Cell::new(value.into()),
            allowed: Vec::new(),
        }
    }

    /// Create an allow-listed option holding `name`, accepting only `name`
    /// itself or one of `aliases` on every store.
    ///
    /// ```rust
    /// use tunables::kinds::Text;
    ///
    /// let who = Text::alias("Thomas", ["Tom", "Tommy"]);
    /// assert!(who.set("Tommy").is_ok());
    /// assert_eq!(who.set("Tommey").unwrap_err().to_string(), "\"Tommey\" invalid");
    /// ```
    pub fn alias<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut allowed: Vec<String> = aliases.into_iter().map(Into::into).collect();
        allowed.push(name.clone());
        Self {
            cell: Cell::new(name),
            allowed,
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.cell.get()
    }

    /// Validate against the allow-list, then replace and publish.
    pub fn store(&self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if !self.allowed.is_empty() && !self.allowed.iter().any(|name| *name == value) {
            return Err(OptError::Invalid { value });
        }
        self.cell.replace(value);
        Ok(())
    }

    /// Store `text` verbatim; strings have no parse step.
    pub fn set(&self, text: &str) -> Result<()> {
        self.store(text)
    }

    /// Decode a JSON string and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let value: String = serde_json::from_str(text)?;
        self.store(value)
    }

    /// Decode a YAML string scalar and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let value: String = serde_yaml::from_str(text)?;
        self.store(value)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.read(|value| f.write_str(value))
    }
}

impl Serialize for Text {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cell.read(|value| serializer.serialize_str(value))
    }
}

/// An ordered list of strings, replaced atomically as a whole.
pub struct Texts {
    cell: Cell<Vec<String>>,
}

impl Texts {
    /// Create a string sequence option.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cell: Cell::new(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current list.
    pub fn value(&self) -> Vec<String> {
        self.cell.get()
    }

    /// Swap in a new list and publish a change notification.
    pub fn store(&self, values: Vec<String>) -> Result<()> {
        self.cell.replace(values);
        Ok(())
    }

    /// Decode a JSON array of strings and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let values: Vec<String> = serde_json::from_str(text)?;
        self.store(values)
    }

    /// Decode a YAML list of strings and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let values: Vec<String> = serde_yaml::from_str(text)?;
        self.store(values)
    }

    /// Convert a decoded TOML value and store it.
    ///
    /// Expects an array of string literals; any other element type rejects
    /// the whole store and the previous list is retained.
    pub fn unmarshal_toml(&self, input: &toml::Value) -> Result<()> {
        let items = input.as_array().ok_or(OptError::Shape {
            kind: input.type_str(),
        })?;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => values.push(s.to_owned()),
                None => {
                    return Err(OptError::Element {
                        index,
                        kind: item.type_str(),
                    });
                }
            }
        }
        self.store(values)
    }
}

impl fmt::Display for Texts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.read(|values| {
            write!(f, "[")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                if value.chars().any(char::is_whitespace) {
                    write!(f, "{value:?}")?;
                } else {
                    f.write_str(value)?;
                }
            }
            write!(f, "]")
        })
    }
}

impl Serialize for Texts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}
