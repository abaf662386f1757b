//! Schedulers decide where and when a unit of work runs.
//!
//! A scheduler is an execution context: the UI context, a background worker
//! or the virtual clock used by tests. Time-based operators (`delay`,
//! `debounce`, `interval`, `observe_on`) take one as a parameter and never
//! read the wall clock themselves.

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

pub use std::time::Duration;

use crate::subscription::Subscription;

pub mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", feature = "timer", not(target_arch = "wasm32")))]
mod futures_scheduler;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

/// A Scheduler orders tasks and runs them, optionally after a delay.
///
/// Tasks are `'static` but need not be `Send`: every scheduler in this crate
/// runs its tasks on the thread that drives it.
pub trait Scheduler: Clone {
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static;
}

// ==================== TaskHandle ====================

/// Cancellation handle for one scheduled task.
///
/// Clones share state. A handle is closed once its task has run or has been
/// cancelled. Cancelling a handle whose task has not run yet prevents it from
/// running and aborts the backend's pending work.
#[derive(Clone, Default)]
pub struct TaskHandle(Rc<HandleState>);

#[derive(Default)]
struct HandleState {
  closed: Cell<bool>,
  canceller: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle for work that already ran (or never will).
  pub fn finished() -> Self {
    let handle = Self::new();
    handle.0.closed.set(true);
    handle
  }

  /// Called by schedulers once the task has run.
  pub fn mark_finished(&self) {
    self.0.closed.set(true);
    self.0.canceller.borrow_mut().take();
  }

  /// Registers the backend hook that aborts the pending work. Replaces any
  /// earlier hook. On an already closed handle the hook runs immediately.
  pub fn on_cancel(&self, canceller: impl FnOnce() + 'static) {
    if self.is_closed() {
      canceller();
    } else {
      *self.0.canceller.borrow_mut() = Some(Box::new(canceller));
    }
  }

  pub fn cancel(&self) {
    if self.0.closed.replace(true) {
      return;
    }
    let canceller = self.0.canceller.borrow_mut().take();
    if let Some(canceller) = canceller {
      canceller();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.closed.get() }
}

impl Subscription for TaskHandle {
  #[inline]
  fn unsubscribe(self) { self.cancel() }

  #[inline]
  fn is_closed(&self) -> bool { TaskHandle::is_closed(self) }
}

impl Debug for TaskHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TaskHandle")
      .field("closed", &self.is_closed())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[rxflow_macro::test]
  fn cancel_runs_hook_once() {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let handle = TaskHandle::new();
    handle.on_cancel(move || h.set(h.get() + 1));

    handle.cancel();
    handle.cancel();
    assert_eq!(hits.get(), 1);
    assert!(handle.is_closed());
  }

  #[rxflow_macro::test]
  fn finished_handle_drops_hook() {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let handle = TaskHandle::new();
    handle.on_cancel(move || h.set(h.get() + 1));

    handle.mark_finished();
    handle.clone().unsubscribe();
    assert_eq!(hits.get(), 0);
  }

  #[rxflow_macro::test]
  fn hook_on_closed_handle_runs_immediately() {
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let handle = TaskHandle::finished();
    handle.on_cancel(move || h.set(h.get() + 1));
    assert_eq!(hits.get(), 1);
  }
}
