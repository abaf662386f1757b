use std::{convert::Infallible, time::Duration};

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::MutRc,
  scheduler::{Scheduler, TaskHandle},
};

/// Creates an observable that emits `0, 1, 2, ...` on `scheduler`, one value
/// every `period`. The first value arrives after one period.
///
/// The sequence never completes on its own. Bound it with `take` or cancel
/// the returned handle.
pub fn interval<SD>(period: Duration, scheduler: SD) -> Interval<SD> {
  Interval { period, scheduler }
}

#[derive(Clone)]
pub struct Interval<SD> {
  period: Duration,
  scheduler: SD,
}

impl<SD, O> Observable<usize, Infallible, O> for Interval<SD>
where
  O: Observer<usize, Infallible> + 'static,
  SD: Scheduler + 'static,
{
  /// Cancels whichever tick is currently pending.
  type Unsub = TaskHandle;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let chain = TaskHandle::new();
    schedule_tick(self.scheduler, self.period, MutRc::own(Some(observer)), 0, chain.clone());
    chain
  }
}

impl<SD> ObservableExt<usize, Infallible> for Interval<SD> {}

fn schedule_tick<SD, O>(
  scheduler: SD, period: Duration, mut observer: MutRc<Option<O>>, seq: usize, chain: TaskHandle,
) where
  O: Observer<usize, Infallible> + 'static,
  SD: Scheduler + 'static,
{
  if chain.is_closed() {
    return;
  }
  let next_scheduler = scheduler.clone();
  let tick_chain = chain.clone();
  let tick = scheduler.schedule(
    move || {
      let finished = |o: &MutRc<Option<O>>| Observer::<usize, Infallible>::is_finished(o);
      if !finished(&observer) {
        observer.next(seq);
      }
      if finished(&observer) {
        tick_chain.mark_finished();
      } else {
        schedule_tick(next_scheduler, period, observer, seq + 1, tick_chain);
      }
    },
    Some(period),
  );
  chain.on_cancel(move || tick.cancel());
}
