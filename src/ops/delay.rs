use std::time::Duration;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::MutRc,
  scheduler::Scheduler,
  subscription::{LocalSubscription, Subscription, TupleSubscription},
};

/// Shifts every value and the completion by a fixed delay.
///
/// Each notification becomes its own scheduled task, so spacing between
/// values is preserved. Errors are forwarded at once and drop whatever is
/// still pending.
#[derive(Debug, Clone)]
pub struct DelayOp<S, SD> {
  pub(crate) source: S,
  pub(crate) delay: Duration,
  pub(crate) scheduler: SD,
}

pub struct DelayObserver<O, SD> {
  delay: Duration,
  scheduler: SD,
  observer: MutRc<Option<O>>,
  pending: LocalSubscription,
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DelayOp<S, SD>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Item, Err, DelayObserver<O, SD>>,
  SD: Scheduler,
  Item: 'static,
{
  type Unsub = TupleSubscription<S::Unsub, LocalSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { source, delay, scheduler } = self;
    let pending = LocalSubscription::default();
    let observer =
      DelayObserver { delay, scheduler, observer: MutRc::own(Some(observer)), pending: pending.clone() };
    let unsub = source.actual_subscribe(observer);
    TupleSubscription::new(unsub, pending)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DelayOp<S, SD> where S: ObservableExt<Item, Err> {}

impl<Item, Err, O, SD> Observer<Item, Err> for DelayObserver<O, SD>
where
  O: Observer<Item, Err> + 'static,
  SD: Scheduler,
  Item: 'static,
{
  fn next(&mut self, value: Item) {
    if self.pending.is_closed() {
      return;
    }
    let mut observer = self.observer.clone();
    let handle = self
      .scheduler
      .schedule(move || observer.next(value), Some(self.delay));
    self.pending.add(handle);
  }

  fn error(self, err: Err) {
    self.pending.clone().unsubscribe();
    self.observer.error(err)
  }

  fn complete(self) {
    if self.pending.is_closed() {
      return;
    }
    let observer = self.observer;
    let handle = self
      .scheduler
      .schedule(move || observer.complete(), Some(self.delay));
    self.pending.add(handle);
  }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
