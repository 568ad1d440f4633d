//! Network option cells: addresses, address:port pairs, and prefixes.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use ipnet::IpNet;
use serde::{Serialize, Serializer};

use crate::core::{Cell, Token};
use crate::error::{OptError, Result};
use crate::kinds::json_type_str;

/// Network value kinds storable in [`Net`] and [`Nets`] options.
pub trait NetValue: Copy + PartialEq + fmt::Display + Send + Sync + 'static {
    /// Sentinel rendered while the option holds no value.
    const INVALID: &'static str;

    /// Parse the kind's canonical textual form.
    fn parse_text(text: &str) -> Result<Self>;
}

impl NetValue for IpAddr {
    const INVALID: &'static str = "invalid IP";

    fn parse_text(text: &str) -> Result<Self> {
        text.parse().map_err(OptError::parse)
    }
}

impl NetValue for SocketAddr {
    const INVALID: &'static str = "invalid AddrPort";

    fn parse_text(text: &str) -> Result<Self> {
        text.parse().map_err(OptError::parse)
    }
}

impl NetValue for IpNet {
    const INVALID: &'static str = "invalid Prefix";

    fn parse_text(text: &str) -> Result<Self> {
        text.parse().map_err(OptError::parse)
    }
}

/// A network option over one of the [`NetValue`] kinds.
///
/// An unset option (see [`Net::empty`]) renders the kind's `invalid ...`
/// sentinel and reports `None` from [`value`](Net::value); every successful
/// store replaces it with a real value.
pub struct Net<T: NetValue> {
    cell: Cell<Option<T>>,
}

/// IP address option (`192.168.0.1`, `::1`).
pub type Addr = Net<IpAddr>;
/// Address:port option (`192.168.0.1:80`, `[::1]:443`).
pub type AddrPort = Net<SocketAddr>;
/// CIDR prefix option (`192.168.0.1/24`).
pub type Prefix = Net<IpNet>;

impl<T: NetValue> Net<T> {
    /// Create a network option with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            cell: Cell::new(Some(value)),
        }
    }

    /// Create a network option with no value.
    pub fn empty() -> Self {
        Self {
            cell: Cell::new(None),
        }
    }

    /// Create a network option from a canonical-form literal.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not in the kind's canonical textual form.
    pub fn must_parse(text: &str) -> Self {
        match T::parse_text(text) {
            Ok(value) => Self::new(value),
            Err(err) => panic!("invalid network literal {text:?}: {err}"),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value, or `None` if the option was never given one.
    pub fn value(&self) -> Option<T> {
        self.cell.get()
    }

    /// Replace the value and publish a change notification.
    pub fn store(&self, value: T) -> Result<()> {
        self.cell.replace(Some(value));
        Ok(())
    }

    /// Parse a canonical-form literal and store the result.
    pub fn set(&self, text: &str) -> Result<()> {
        self.store(T::parse_text(text)?)
    }

    /// Decode a JSON string of the canonical form and store it.
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

    /// Decode a YAML string of the canonical form and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let s: String = serde_yaml::from_str(text)?;
        self.set(&s)
    }
}

impl<T: NetValue> Default for Net<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: NetValue> fmt::Display for Net<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(T::INVALID),
        }
    }
}

impl<T: NetValue> Serialize for Net<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// An ordered list of network values, replaced atomically as a whole.
pub struct Nets<T: NetValue> {
    cell: Cell<Vec<T>>,
}

/// IP address sequence option.
pub type Addrs = Nets<IpAddr>;
/// Address:port sequence option.
pub type AddrPorts = Nets<SocketAddr>;
/// CIDR prefix sequence option.
pub type Prefixes = Nets<IpNet>;

impl<T: NetValue> Nets<T> {
    /// Create a network sequence option.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            cell: Cell::new(values),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current list.
    pub fn value(&self) -> Vec<T> {
        self.cell.get()
    }

    /// Swap in a new list and publish a change notification.
    pub fn store(&self, values: Vec<T>) -> Result<()> {
        self.cell.replace(values);
        Ok(())
    }

    /// Decode a JSON array of canonical-form strings and store it.
    ///
    /// All-or-nothing: the first unparsable element rejects the whole store
    /// and the previous list is retained.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let items: Vec<String> = serde_json::from_str(text)?;
        self.store(parse_all::<T>(&items)?)
    }

    /// Decode a YAML list of canonical-form strings and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let items: Vec<String> = serde_yaml::from_str(text)?;
        self.store(parse_all::<T>(&items)?)
    }

    /// Convert a decoded TOML value and store it.
    ///
    /// Expects an array of string literals in the kind's canonical form;
    /// a non-string element or unparsable literal rejects the whole store.
    pub fn unmarshal_toml(&self, input: &toml::Value) -> Result<()> {
        let items = input.as_array().ok_or(OptError::Shape {
            kind: input.type_str(),
        })?;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let s = item.as_str().ok_or(OptError::Element {
                index,
                kind: item.type_str(),
            })?;
            values.push(T::parse_text(s)?);
        }
        self.store(values)
    }
}

fn parse_all<T: NetValue>(items: &[String]) -> Result<Vec<T>> {
    items.iter().map(|s| T::parse_text(s)).collect()
}

impl<T: NetValue> fmt::Display for Nets<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.read(|values| {
            write!(f, "[")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value}")?;
            }
            write!(f, "]")
        })
    }
}

impl<T: NetValue> Serialize for Nets<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let rendered: Vec<String> = self
            .cell
            .read(|values| values.iter().map(|v| v.to_string()).collect());
        rendered.serialize(serializer)
    }
}
