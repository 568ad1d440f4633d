//! Integration tests for the change-notification bus.
//!
//! The bus is a process-wide singleton shared by every test in this binary,
//! so each test filters received tokens down to its own options and always
//! unsubscribes before asserting.

use crossbeam_channel::unbounded;
use tunables::bus;
use tunables::core::Token;
use tunables::kinds::{Number, Text, Texts};

fn drain_for(rx: &crossbeam_channel::Receiver<Token>, token: Token) -> usize {
    rx.try_iter().filter(|t| *t == token).count()
}

#[test]
fn successful_store_publishes_exactly_once() {
    let opt = Number::new(1i32);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());
    opt.store(2).unwrap();
    bus::unsubscribe(&tx);

    assert_eq!(drain_for(&rx, opt.token()), 1);
    assert_eq!(opt.value(), 2);
}

#[test]
fn failed_store_publishes_nothing() {
    let opt = Number::bounded(5i32, 1, 10);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());
    assert!(opt.store(99).is_err());
    bus::unsubscribe(&tx);

    assert_eq!(drain_for(&rx, opt.token()), 0);
}

#[test]
fn every_subscriber_receives_each_token() {
    let opt = Text::new("a");

    let (tx1, rx1) = unbounded();
    let (tx2, rx2) = unbounded();
    bus::subscribe(tx1.clone());
    bus::subscribe(tx2.clone());

    opt.store("b").unwrap();
    opt.store("c").unwrap();

    bus::unsubscribe(&tx1);
    bus::unsubscribe(&tx2);

    assert_eq!(drain_for(&rx1, opt.token()), 2);
    assert_eq!(drain_for(&rx2, opt.token()), 2);
}

#[test]
fn unsubscribe_stops_delivery() {
    let opt = Number::new(0u8);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());
    opt.store(1).unwrap();
    bus::unsubscribe(&tx);
    opt.store(2).unwrap();

    assert_eq!(drain_for(&rx, opt.token()), 1);
}

#[test]
fn unsubscribe_of_unknown_channel_is_a_no_op() {
    let (tx, _rx) = unbounded::<Token>();
    bus::unsubscribe(&tx);
}

#[test]
fn per_channel_order_follows_store_order() {
    let first = Number::new(0i32);
    let second = Number::new(0i32);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());

    // Stores from one thread must be observed in issue order.
    first.store(1).unwrap();
    second.store(1).unwrap();
    first.store(2).unwrap();

    bus::unsubscribe(&tx);

    let ours: Vec<Token> = rx
        .try_iter()
        .filter(|t| *t == first.token() || *t == second.token())
        .collect();
    assert_eq!(ours, vec![first.token(), second.token(), first.token()]);
}

#[test]
fn tokens_identify_the_option_not_the_value() {
    let names = Texts::new(["x"]);
    let count = Number::new(0i64);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());

    names.store(vec!["y".into()]).unwrap();
    count.store(7).unwrap();

    bus::unsubscribe(&tx);

    let mut saw_names = 0;
    let mut saw_count = 0;
    for token in rx.try_iter() {
        if token == names.token() {
            saw_names += 1;
            // The token carries no value; re-read the option.
            assert_eq!(names.value(), vec!["y"]);
        } else if token == count.token() {
            saw_count += 1;
            assert_eq!(count.value(), 7);
        }
    }
    assert_eq!((saw_names, saw_count), (1, 1));
}

#[test]
fn dropped_receiver_does_not_block_stores() {
    let opt = Number::new(0i16);

    let (tx, rx) = unbounded();
    bus::subscribe(tx.clone());
    drop(rx);

    // Delivery to the disconnected channel is skipped, not an error.
    opt.store(3).unwrap();
    assert_eq!(opt.value(), 3);

    bus::unsubscribe(&tx);
}
