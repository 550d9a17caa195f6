#![forbid(unsafe_code)]

//! One-shot completion handlers for animations.
//!
//! A [`Completion`] carries a caller-supplied closure that must run exactly
//! once, with `true` when the animation it belongs to ran to the end and
//! `false` when it was interrupted or could not reach its target.
//!
//! Owners that hold their animation state behind a `RefCell` should not run
//! user closures while the borrow is live, since the closure may call back
//! into the owner. [`Completion::finish`] records the outcome without running
//! anything; the resulting [`FinishedCompletion`] is queued and fired once
//! the borrow has been released.
//!
//! # Invariants
//!
//! 1. The closure runs at most once.
//! 2. A `Completion` dropped without an outcome reports `false`.
//! 3. A `FinishedCompletion` dropped without an explicit `fire` still runs
//!    with its recorded outcome.

use std::fmt;

type Handler = Box<dyn FnOnce(bool)>;

/// A pending completion handler.
#[derive(Default)]
pub struct Completion {
    handler: Option<Handler>,
}

impl Completion {
    /// Wrap a closure.
    pub fn new(handler: impl FnOnce(bool) + 'static) -> Self {
        Self {
            handler: Some(Box::new(handler)),
        }
    }

    /// A completion with nothing to run.
    pub fn none() -> Self {
        Self { handler: None }
    }

    /// Whether a closure is attached.
    pub fn is_some(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the handler immediately.
    pub fn fire(mut self, completed: bool) {
        if let Some(handler) = self.handler.take() {
            handler(completed);
        }
    }

    /// Record the outcome for a later [`FinishedCompletion::fire`].
    #[must_use = "a finished completion runs when fired or dropped"]
    pub fn finish(mut self, completed: bool) -> FinishedCompletion {
        FinishedCompletion {
            handler: self.handler.take(),
            completed,
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.handler.is_some())
            .finish()
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler(false);
        }
    }
}

/// A completion whose outcome is known but whose closure has not run yet.
pub struct FinishedCompletion {
    handler: Option<Handler>,
    completed: bool,
}

impl FinishedCompletion {
    /// The recorded outcome.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Run the handler with the recorded outcome.
    pub fn fire(mut self) {
        if let Some(handler) = self.handler.take() {
            handler(self.completed);
        }
    }
}

impl fmt::Debug for FinishedCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinishedCompletion")
            .field("completed", &self.completed)
            .field("pending", &self.handler.is_some())
            .finish()
    }
}

impl Drop for FinishedCompletion {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler(self.completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, Completion) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Completion::new(move |done| sink.borrow_mut().push(done)))
    }

    #[test]
    fn fire_runs_once() {
        let (log, c) = recorder();
        c.fire(true);
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn drop_reports_false() {
        let (log, c) = recorder();
        drop(c);
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn finish_defers_until_fire() {
        let (log, c) = recorder();
        let finished = c.finish(true);
        assert!(log.borrow().is_empty());
        assert!(finished.completed());
        finished.fire();
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn dropped_finished_fires_recorded_outcome() {
        let (log, c) = recorder();
        drop(c.finish(true));
        assert_eq!(*log.borrow(), vec![true]);
    }

    #[test]
    fn none_is_inert() {
        let c = Completion::none();
        assert!(!c.is_some());
        c.fire(true);
        Completion::default().finish(false).fire();
    }
}
