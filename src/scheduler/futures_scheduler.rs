//! `futures` local executor backend.
//!
//! Any `LocalSpawner` (usually from a `futures::executor::LocalPool`) can run
//! scheduled work. Delays are real timers from `futures-time`.

use futures::{
  executor::LocalSpawner,
  future::{abortable, FutureExt},
  task::LocalSpawnExt,
};

use super::{Duration, Scheduler, TaskHandle};

impl Scheduler for LocalSpawner {
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static,
  {
    let handle = TaskHandle::new();
    let finished = handle.clone();
    let fut = async move {
      if let Some(delay) = delay {
        futures_time::task::sleep(futures_time::time::Duration::from(delay)).await;
      }
      if !finished.is_closed() {
        task();
        finished.mark_finished();
      }
    };

    let (fut, abort) = abortable(fut);
    if let Err(err) = self.spawn_local(fut.map(|_| ())) {
      tracing::warn!(error = %err, "local spawner rejected a scheduled task");
      return TaskHandle::finished();
    }
    handle.on_cancel(move || abort.abort());
    handle
  }
}
