//! Option kinds: scalar and sequence cells per value type.
//!
//! Scalar kinds share one contract: `value()` under the shared lock,
//! `store(v)` validated under the exclusive lock with a change token
//! published on success, `set(text)` parsing the kind's textual form, a
//! [`Display`](std::fmt::Display) impl rendering that form back, a
//! [`Serialize`](serde::Serialize) impl for the structured form, and
//! `unmarshal_json` / `unmarshal_yaml` setters for structured input.
//! Sequence kinds replace the whole list atomically and decode structured
//! lists all-or-nothing.

pub mod boolean;
pub mod duration;
pub mod net;
pub mod number;
pub mod string;
pub mod timestamp;
pub mod url;

pub use boolean::Bool;
pub use duration::Duration;
pub use net::{Addr, AddrPort, AddrPorts, Addrs, Net, NetValue, Nets, Prefix, Prefixes};
pub use number::{Number, Numbers, Numeric};
pub use string::{Text, Texts};
pub use timestamp::Timestamp;
pub use url::Url;

/// Type name of a JSON value, for shape errors on kinds that only accept
/// strings.
pub(crate) fn json_type_str(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
