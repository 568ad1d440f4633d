//! Input sources that drive option setters.

mod env;

pub use env::Env;
