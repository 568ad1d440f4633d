//! # tunables
//!
//! Runtime-tunable typed option cells with validated mutation, multi-format
//! (de)serialization, and change notification.
//!
//! ## Overview
//!
//! `tunables` provides typed value cells for settings that change at
//! runtime:
//! - Concurrent reads under a per-cell shared lock; stores take the
//!   exclusive mode, so readers never see a partially written value
//! - Validated mutation: inclusive bounds on numbers, durations, and
//!   timestamps, and allow-lists on strings, enforced on every store
//! - Text, JSON, YAML, and TOML forms per kind, implemented as the
//!   marshal/unmarshal contract external decoders and flag parsers invoke
//! - A process-wide [notification bus](bus) that delivers an opaque change
//!   token for every successful store, without boxing values
//! - An [environment binder](sources::Env) dispatching `KEY=VALUE` pairs to
//!   the matching option's textual setter
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration as StdDuration;
//! use tunables::prelude::*;
//!
//! struct Settings {
//!     verbose: Bool,
//!     timeout: kinds::Duration,
//!     listen: AddrPort,
//! }
//!
//! let settings = Settings {
//!     verbose: Bool::new(false),
//!     timeout: kinds::Duration::bounded(
//!         StdDuration::from_secs(3),
//!         StdDuration::from_secs(1),
//!         StdDuration::from_secs(30),
//!     ),
//!     listen: AddrPort::must_parse("127.0.0.1:8080"),
//! };
//!
//! // Observe changes generically: tokens identify which option changed.
//! let (tx, rx) = crossbeam_channel::unbounded();
//! bus::subscribe(tx.clone());
//!
//! settings.timeout.set("5s").unwrap();
//! assert_eq!(settings.timeout.value(), StdDuration::from_secs(5));
//!
//! // Out-of-bounds stores fail, keep the old value, and publish nothing.
//! assert!(settings.timeout.set("10m").is_err());
//! assert_eq!(settings.timeout.value(), StdDuration::from_secs(5));
//!
//! bus::unsubscribe(&tx);
//! let changed: Vec<_> = rx
//!     .try_iter()
//!     .filter(|t| *t == settings.timeout.token())
//!     .collect();
//! assert_eq!(changed.len(), 1);
//! # let _ = (&settings.verbose, &settings.listen);
//! ```
//!
//! ## Input sources
//!
//! Options are mutated through their setters by whatever drives them: a
//! flag parser calling `set`, a JSON/YAML decoder calling `unmarshal_json`
//! / `unmarshal_yaml`, a TOML decoder handing sequences a decoded
//! [`toml::Value`], or the [`Env`](sources::Env) binder applying
//! environment pairs. Validation and notification behave identically on
//! every path.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod bus;
pub mod core;
pub mod error;
pub mod kinds;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::bus;
    pub use crate::core::Token;
    pub use crate::error::{OptError, Result};
    pub use crate::kinds::{
        self, Addr, AddrPort, AddrPorts, Addrs, Bool, Number, Numbers, Prefix, Prefixes, Text,
        Texts, Timestamp, Url,
    };
    pub use crate::sources::Env;
}
