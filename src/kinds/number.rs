//! Numeric option cells, scalar and sequence.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{Bounds, Cell, Token};
use crate::error::{OptError, Result};

/// Family of primitive numeric types usable in [`Number`] and [`Numbers`]
/// options.
///
/// Implemented for the signed, unsigned, and float primitives. The f64
/// methods bridge to the structured-format representation, which carries
/// numbers as 64-bit floats.
pub trait Numeric: Copy + PartialOrd + fmt::Display + Send + Sync + 'static {
    /// Parse a locale-free numeric literal.
    fn parse_text(text: &str) -> Result<Self>;
    /// Convert to the 64-bit float wire representation.
    fn to_f64(self) -> f64;
    /// Convert back from the 64-bit float wire representation.
    fn from_f64(value: f64) -> Self;
    /// Convert from a structured-format integer literal.
    fn from_i64(value: i64) -> Self;
}

macro_rules! numeric {
    ($($ty:ty),* $(,)?) => {$(
        impl Numeric for $ty {
            fn parse_text(text: &str) -> Result<Self> {
                text.trim().parse().map_err(OptError::parse)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn from_i64(value: i64) -> Self {
                value as $ty
            }
        }
    )*};
}

numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// A numeric option with optional inclusive bounds.
pub struct Number<T: Numeric> {
    cell: Cell<T>,
    bounds: Option<Bounds<T>>,
}

impl<T: Numeric> Number<T> {
    /// Create an unbounded numeric option.
    pub fn new(value: T) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: None,
        }
    }

    /// Create a numeric option that rejects stores outside `[min, max]`.
    ///
    /// Bounds are inclusive; `min == max` pins the option to a single
    /// acceptable value.
    pub fn bounded(value: T, min: T, max: T) -> Self {
        Self {
            cell: Cell::new(value),
            bounds: Some(Bounds { min, max }),
        }
    }

    /// Identity token published on the bus when this option changes.
    pub fn token(&self) -> Token {
        self.cell.token()
    }

    /// Current value.
    pub fn value(&self) -> T {
        self.cell.get()
    }

    /// Validate `value` against the bounds, then replace and publish.
    ///
    /// A violation reports which bound failed and leaves the stored value
    /// untouched; nothing is published.
    pub fn store(&self, value: T) -> Result<()> {
        if let Some(bounds) = &self.bounds {
            bounds.check(&value)?;
        }
        self.cell.replace(value);
        Ok(())
    }

    /// Parse a numeric literal and store the result.
    pub fn set(&self, text: &str) -> Result<()> {
        self.store(T::parse_text(text)?)
    }

    /// Decode a JSON number and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let value: f64 = serde_json::from_str(text)?;
        self.store(T::from_f64(value))
    }

    /// Decode a YAML numeric scalar and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let value: f64 = serde_yaml::from_str(text)?;
        self.store(T::from_f64(value))
    }
}

impl<T: Numeric> fmt::Display for Number<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<T: Numeric> Serialize for Number<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // The wire form carries numbers as 64-bit floats in both directions.
        serializer.serialize_f64(self.value().to_f64())
    }
}

/// An ordered list of numbers, replaced atomically as a whole.
///
/// No per-element bounds; any list stores successfully.
pub struct Numbers<T: Numeric> {
    cell: Cell<Vec<T>>,
}

impl<T: Numeric> Numbers<T> {
    /// Create a numeric sequence option.
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

    /// Decode a JSON array of numbers and store it.
    pub fn unmarshal_json(&self, text: &str) -> Result<()> {
        let values: Vec<f64> = serde_json::from_str(text)?;
        self.store(values.into_iter().map(T::from_f64).collect())
    }

    /// Decode a YAML list of numeric scalars and store it.
    pub fn unmarshal_yaml(&self, text: &str) -> Result<()> {
        let values: Vec<f64> = serde_yaml::from_str(text)?;
        self.store(values.into_iter().map(T::from_f64).collect())
    }

    /// Convert a decoded TOML value and store it.
    ///
    /// Expects an array of integer or float literals; any other element
    /// type rejects the whole store and the previous list is retained.
    pub fn unmarshal_toml(&self, input: &toml::Value) -> Result<()> {
        let items = input.as_array().ok_or(OptError::Shape {
            kind: input.type_str(),
        })?;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                toml::Value::Integer(i) => values.push(T::from_i64(*i)),
                toml::Value::Float(f) => values.push(T::from_f64(*f)),
                other => {
                    return Err(OptError::Element {
                        index,
                        kind: other.type_str(),
                    });
                }
            }
        }
        self.store(values)
    }
}

impl<T: Numeric> fmt::Display for Numbers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cell.read(|values| {
            write!(f, "[")?;
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{value}")?;
            }
            write!(f, "]")
        })
    }
}

impl<T: Numeric> Serialize for Numbers<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let bridged: Vec<f64> = self
            .cell
            .read(|values| values.iter().map(|v| v.to_f64()).collect());
        bridged.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_within_bounds() {
        let opt = Number::bounded(5i32, 1, 10);
        opt.store(7).unwrap();
        assert_eq!(opt.value(), 7);
    }

    #[test]
    fn store_outside_bounds_is_rejected() {
        let opt = Number::bounded(5i32, 1, 10);

        let err = opt.store(0).unwrap_err();
        assert_eq!(err.to_string(), "0 < min{1}");
        assert_eq!(opt.value(), 5);

        let err = opt.store(11).unwrap_err();
        assert_eq!(err.to_string(), "11 > max{10}");
        assert_eq!(opt.value(), 5);
    }

    #[test]
    fn set_parses_and_validates() {
        let opt = Number::bounded(5u16, 1, 10);
        opt.set("9").unwrap();
        assert_eq!(opt.value(), 9);
        assert!(opt.set("12").is_err());
        assert!(opt.set("twelve").is_err());
        assert_eq!(opt.value(), 9);
    }

    #[test]
    fn unbounded_accepts_anything() {
        let opt = Number::new(0i64);
        opt.store(i64::MIN).unwrap();
        assert_eq!(opt.value(), i64::MIN);
    }

    #[test]
    fn json_uses_numbers() {
        let opt = Number::new(3.5f64);
        assert_eq!(serde_json::to_string(&opt).unwrap(), "3.5");
        opt.unmarshal_json("4.25").unwrap();
        assert_eq!(opt.value(), 4.25);
    }

    #[test]
    fn json_encode_bridges_through_f64() {
        // 2^53 + 1 is not representable as an f64; the wire form rounds it
        // the same way the decode path would.
        let opt = Number::new(9_007_199_254_740_993i64);
        assert_eq!(
            serde_json::to_string(&opt).unwrap(),
            "9007199254740992.0"
        );

        let seq = Numbers::new(vec![1i64, 9_007_199_254_740_993]);
        assert_eq!(
            serde_json::to_string(&seq).unwrap(),
            "[1.0,9007199254740992.0]"
        );
    }

    #[test]
    fn sequence_display_is_comma_joined() {
        let opt = Numbers::new(vec![1i32, 2, 3]);
        assert_eq!(opt.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn sequence_store_replaces_wholesale() {
        let opt = Numbers::new(vec![1u8, 2]);
        opt.store(vec![9, 8, 7]).unwrap();
        assert_eq!(opt.value(), vec![9, 8, 7]);
    }

    #[test]
    fn sequence_toml_accepts_integers_and_floats() {
        let opt = Numbers::new(Vec::<f64>::new());
        let input: toml::Value = "v = [1, 2.5]".parse::<toml::Table>().unwrap()["v"].clone();
        opt.unmarshal_toml(&input).unwrap();
        assert_eq!(opt.value(), vec![1.0, 2.5]);
    }

    #[test]
    fn sequence_toml_rejects_mixed_types_wholesale() {
        let opt = Numbers::new(vec![1i32, 2]);
        let input: toml::Value = "v = [3, \"four\"]".parse::<toml::Table>().unwrap()["v"].clone();
        let err = opt.unmarshal_toml(&input).unwrap_err();
        assert_eq!(err.to_string(), "[1]{string} invalid");
        assert_eq!(opt.value(), vec![1, 2]);
    }

    #[test]
    fn sequence_toml_rejects_non_arrays() {
        let opt = Numbers::new(Vec::<i32>::new());
        let input: toml::Value = "v = \"nope\"".parse::<toml::Table>().unwrap()["v"].clone();
        assert_eq!(
            opt.unmarshal_toml(&input).unwrap_err().to_string(),
            "string invalid"
        );
    }
}
