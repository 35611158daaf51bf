use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

#[test]
fn waiters_run_in_registration_order_on_fire() {
    let sig = ReadinessSignal::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    for i in 0..3 {
        let log = Rc::clone(&log);
        sig.subscribe(move || log.borrow_mut().push(i));
    }
    assert_eq!(sig.pending_waiters(), 3);
    assert!(log.borrow().is_empty());

    sig.fire();
    assert!(sig.is_fired());
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
    assert_eq!(sig.pending_waiters(), 0);
}

#[test]
fn late_subscriber_runs_immediately() {
    let sig = ReadinessSignal::new();
    sig.fire();

    let hit = Rc::new(Cell::new(false));
    let h = Rc::clone(&hit);
    sig.subscribe(move || h.set(true));
    assert!(hit.get());
}

#[test]
fn clones_share_state() {
    let a = ReadinessSignal::new();
    let b = a.clone();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    b.subscribe(move || h.set(h.get() + 1));
    a.fire();
    assert!(b.is_fired());
    assert_eq!(hits.get(), 1);
}

#[test]
fn waiter_may_subscribe_during_drain() {
    let sig = ReadinessSignal::new();
    let hits = Rc::new(Cell::new(0));

    let inner_sig = sig.clone();
    let h = Rc::clone(&hits);
    sig.subscribe(move || {
        let h2 = Rc::clone(&h);
        inner_sig.subscribe(move || h2.set(h2.get() + 10));
        h.set(h.get() + 1);
    });
    sig.fire();
    assert_eq!(hits.get(), 11);
}

#[test]
fn release_drops_queued_waiters() {
    let sig = ReadinessSignal::new();
    let hit = Rc::new(Cell::new(false));
    let h = Rc::clone(&hit);
    sig.subscribe(move || h.set(true));
    sig.release();
    assert_eq!(sig.pending_waiters(), 0);
    sig.fire();
    assert!(!hit.get());
}

#[test]
#[should_panic(expected = "fired twice")]
fn double_fire_panics() {
    let sig = ReadinessSignal::new();
    sig.fire();
    sig.fire();
}
