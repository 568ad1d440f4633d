//! The value slot every option kind is built on.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::bus;
use crate::error::{OptError, Result};

/// Opaque identity of a single option instance.
///
/// A token is minted once, at construction, and delivered on the
/// [notification bus](crate::bus) whenever that option's value is stored.
/// It carries no value: observers that care about the new state re-read the
/// option through its `value()` accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u64);

impl Token {
    fn mint() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Token(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn id(self) -> u64 {
        self.0
    }
}

/// A value slot with per-cell locking and change publication.
///
/// Reads take the shared mode; [`replace`](Cell::replace) takes the
/// exclusive mode and publishes the cell's token before releasing it, so
/// publish order on any one option matches its store order.
pub(crate) struct Cell<T> {
    token: Token,
    value: RwLock<T>,
}

impl<T> Cell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            token: Token::mint(),
            value: RwLock::new(value),
        }
    }

    pub(crate) fn token(&self) -> Token {
        self.token
    }

    pub(crate) fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.read().clone()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    pub(crate) fn replace(&self, value: T) {
        let mut slot = self.value.write();
        *slot = value;
        tracing::trace!(token = self.token.id(), "option stored");
        // Deliver while the write guard is held: no two stores on this cell
        // can interleave their publications.
        bus::publish(self.token);
    }
}

/// An inclusive `[min, max]` range enforced on every store.
///
/// Bounds are either present and active or absent entirely; there is no
/// sentinel encoding, so a zero-width range (`min == max`) is a legitimate
/// single-value constraint.
pub(crate) struct Bounds<T> {
    pub(crate) min: T,
    pub(crate) max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub(crate) fn check_with(&self, value: &T, render: impl Fn(&T) -> String) -> Result<()> {
        if *value < self.min {
            return Err(OptError::BelowMin {
                value: render(value),
                min: render(&self.min),
            });
        }
        if *value > self.max {
            return Err(OptError::AboveMax {
                value: render(value),
                max: render(&self.max),
            });
        }
        Ok(())
    }
}

impl<T: PartialOrd + fmt::Display> Bounds<T> {
    pub(crate) fn check(&self, value: &T) -> Result<()> {
        self.check_with(value, |v| v.to_string())
    }
}
