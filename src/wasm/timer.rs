use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// A single pending `Timeout` slot. Scheduling replaces (and so cancels) the
/// previous callback; only the last one scheduled ever runs.
#[derive(Clone, Default)]
pub struct Debounce {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule<F>(&self, millis: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        // The fired timeout stays in the slot until the next schedule; dropping
        // it from inside its own callback would free the running closure.
        *self.pending.borrow_mut() = Some(Timeout::new(millis, f));
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}
