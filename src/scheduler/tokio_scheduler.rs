//! tokio backend.
//!
//! Tasks go through `tokio::task::spawn_local`, so the scheduler must be used
//! from inside a `tokio::task::LocalSet`.

use super::{Duration, Scheduler, TaskHandle};

/// Schedules work on the current tokio `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let finished = handle.clone();
    let join = tokio::task::spawn_local(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      if !finished.is_closed() {
        task();
        finished.mark_finished();
      }
    });
    handle.on_cancel(move || join.abort());
    handle
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::subscription::Subscription;

  #[rxflow_macro::test]
  async fn runs_tasks_in_delay_order() {
    let local = tokio::task::LocalSet::new();
    let order = Rc::new(RefCell::new(vec![]));

    let o = order.clone();
    local
      .run_until(async move {
        let o2 = o.clone();
        TokioScheduler.schedule(move || o2.borrow_mut().push(2), Some(Duration::from_millis(20)));
        let o1 = o.clone();
        TokioScheduler.schedule(move || o1.borrow_mut().push(1), None);
        tokio::time::sleep(Duration::from_millis(50)).await;
      })
      .await;

    assert_eq!(*order.borrow(), vec![1, 2]);
  }

  #[rxflow_macro::test]
  async fn cancel_aborts_pending_task() {
    let local = tokio::task::LocalSet::new();
    let hit = Rc::new(RefCell::new(false));

    let h = hit.clone();
    local
      .run_until(async move {
        let handle =
          TokioScheduler.schedule(move || *h.borrow_mut() = true, Some(Duration::from_millis(20)));
        handle.unsubscribe();
        tokio::time::sleep(Duration::from_millis(50)).await;
      })
      .await;

    assert!(!*hit.borrow());
  }
}
