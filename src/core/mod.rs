//! Shared plumbing for option cells: identity tokens, the locked value
//! slot, and bounds checking.

mod cell;

pub use cell::Token;
pub(crate) use cell::{Bounds, Cell};
