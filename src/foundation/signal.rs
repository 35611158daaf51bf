use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Waiter = Box<dyn FnOnce()>;

enum SignalState {
    Pending(Vec<Waiter>),
    Fired,
}

/// One-shot, memoized completion notification.
///
/// Waiters registered while the signal is pending run, in registration order, when it fires.
/// Waiters registered after it has fired run immediately and synchronously. Clones share the same
/// underlying state, so a source can hand out its signal and fire it later.
///
/// Firing twice is a programming error and panics.
#[derive(Clone)]
pub struct ReadinessSignal {
    inner: Rc<RefCell<SignalState>>,
}

impl Default for ReadinessSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessSignal {
    /// Create a pending signal with no waiters.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalState::Pending(Vec::new()))),
        }
    }

    /// Return `true` once [`ReadinessSignal::fire`] has been called.
    pub fn is_fired(&self) -> bool {
        matches!(*self.inner.borrow(), SignalState::Fired)
    }

    /// Number of waiters queued and not yet run.
    pub fn pending_waiters(&self) -> usize {
        match &*self.inner.borrow() {
            SignalState::Pending(w) => w.len(),
            SignalState::Fired => 0,
        }
    }

    /// Register `f` to run when the signal fires, or run it now if it already has.
    pub fn subscribe(&self, f: impl FnOnce() + 'static) {
        {
            let mut state = self.inner.borrow_mut();
            if let SignalState::Pending(waiters) = &mut *state {
                waiters.push(Box::new(f));
                return;
            }
        }
        f();
    }

    /// Transition to fired and drain queued waiters in registration order.
    ///
    /// # Panics
    ///
    /// Panics if the signal has already fired.
    pub fn fire(&self) {
        let waiters = {
            let mut state = self.inner.borrow_mut();
            match std::mem::replace(&mut *state, SignalState::Fired) {
                SignalState::Pending(w) => w,
                SignalState::Fired => panic!("readiness signal fired twice"),
            }
        };
        for w in waiters {
            w();
        }
    }

    /// Drop every queued waiter without running it. A fired signal stays fired.
    pub fn release(&self) {
        if let SignalState::Pending(waiters) = &mut *self.inner.borrow_mut() {
            waiters.clear();
        }
    }
}

impl fmt::Debug for ReadinessSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessSignal")
            .field("fired", &self.is_fired())
            .field("pending_waiters", &self.pending_waiters())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/signal.rs"]
mod tests;
