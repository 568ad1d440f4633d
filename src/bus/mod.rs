//! Process-wide change-notification bus.
//!
//! Every successful store publishes the option's [`Token`] to every
//! subscribed channel, in registration order. Delivery is synchronous: a
//! bounded channel that has filled up blocks the publishing store until the
//! subscriber drains it. That back-pressure is deliberate: subscribers must
//! keep draining or size their buffers for the mutation rate they expect.
//!
//! The bus carries only identity. Observers that need the new value re-read
//! the option they correlate the token with:
//!
//! ```rust
//! use tunables::{bus, kinds::Number};
//!
//! let retries = Number::new(3u32);
//!
//! let (tx, rx) = crossbeam_channel::unbounded();
//! bus::subscribe(tx.clone());
//!
//! retries.store(5).unwrap();
//!
//! bus::unsubscribe(&tx);
//! assert!(rx.try_iter().any(|token| token == retries.token()));
//! assert_eq!(retries.value(), 5);
//! ```

use crossbeam_channel::Sender;
use parking_lot::RwLock;

use crate::core::Token;

static SUBSCRIBERS: RwLock<Vec<Sender<Token>>> = RwLock::new(Vec::new());

/// Subscribe a channel to option change notifications.
///
/// Safe to call concurrently with publication; registration takes effect
/// for the next store.
pub fn subscribe(tx: Sender<Token>) {
    SUBSCRIBERS.write().push(tx);
}

/// Remove a previously subscribed channel.
///
/// Removes the first matching registration; a no-op if the channel was
/// never subscribed.
pub fn unsubscribe(tx: &Sender<Token>) {
    let mut subs = SUBSCRIBERS.write();
    if let Some(pos) = subs.iter().position(|sub| sub.same_channel(tx)) {
        subs.remove(pos);
    }
}

/// Deliver `token` to every subscriber, in registration order.
///
/// Publishing to zero subscribers is a no-op. A channel whose receiver has
/// been dropped is skipped, which makes dropping the receiver an implicit
/// unsubscribe at delivery time.
pub(crate) fn publish(token: Token) {
    let subs = SUBSCRIBERS.read();
    for tx in subs.iter() {
        if tx.send(token).is_err() {
            tracing::trace!(token = token.id(), "subscriber disconnected, skipping");
        }
    }
}
