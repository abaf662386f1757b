//! The counter flow: `0..=last`, one value per period, produced on a worker
//! scheduler.

use std::{convert::Infallible, time::Duration};

use crate::{
  observable::{interval, Observable, ObservableExt},
  observer::Observer,
  scheduler::{Scheduler, TaskHandle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
  /// Pause before every value, including the first.
  pub period: Duration,
  /// Last value emitted before completion.
  pub last: u32,
}

impl Default for CounterConfig {
  fn default() -> Self { Self { period: Duration::from_millis(500), last: 10 } }
}

impl CounterConfig {
  pub fn with_period(mut self, period: Duration) -> Self {
    self.period = period;
    self
  }

  pub fn with_last(mut self, last: u32) -> Self {
    self.last = last;
    self
  }
}

/// Returns the counter flow described by `config`, produced on `worker`.
///
/// The flow is cold: nothing is scheduled until it is subscribed, and every
/// subscription counts from zero again. Values are delivered wherever the
/// worker runs its tasks. Use `observe_on` to hand them to another context.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxflow::{counter::CounterConfig, prelude::*, scheduler::TestScheduler};
///
/// TestScheduler::init();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
/// rxflow::counter::emitter(&CounterConfig::default().with_last(2), TestScheduler)
///   .subscribe(move |v| s.borrow_mut().push(v));
///
/// TestScheduler::advance_by(Duration::from_millis(1500));
/// assert_eq!(*seen.borrow(), vec![0, 1, 2]);
/// ```
pub fn emitter<SD>(config: &CounterConfig, worker: SD) -> CounterEmitter<SD> {
  CounterEmitter { period: config.period, last: config.last, worker }
}

#[derive(Clone)]
pub struct CounterEmitter<SD> {
  period: Duration,
  last: u32,
  worker: SD,
}

impl<SD, O> Observable<u32, Infallible, O> for CounterEmitter<SD>
where
  O: Observer<u32, Infallible> + 'static,
  SD: Scheduler + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    tracing::debug!(period = ?self.period, last = self.last, "counter flow started");
    let count = usize::try_from(self.last)
      .ok()
      .and_then(|last| last.checked_add(1))
      .unwrap_or(usize::MAX);
    interval(self.period, self.worker)
      .take(count)
      .map(|tick: usize| u32::try_from(tick).unwrap_or(u32::MAX))
      .tap(|value: &u32| tracing::debug!(value, "emitting"))
      .actual_subscribe(observer)
  }
}

impl<SD> ObservableExt<u32, Infallible> for CounterEmitter<SD> {}
