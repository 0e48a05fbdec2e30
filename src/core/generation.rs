//! Generation counters for discarding stale async results.

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic counter shared by everything that starts async work.
#[derive(Clone, Debug, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; every earlier ticket becomes stale.
    pub fn advance(&self) -> Ticket {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        Ticket {
            value: next,
            counter: Rc::clone(&self.0),
        }
    }
}

/// Proof that work was started in a given generation.
#[derive(Clone, Debug)]
pub struct Ticket {
    value: u64,
    counter: Rc<Cell<u64>>,
}

impl Ticket {
    /// `false` once a newer generation has started.
    pub fn is_current(&self) -> bool {
        self.counter.get() == self.value
    }
}
