use std::time::Duration;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  scheduler::{Scheduler, TaskHandle},
  subscription::{Subscription, TupleSubscription},
};

#[derive(Clone)]
pub struct DebounceOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
  pub(crate) duration: Duration,
}

type PendingTask = MutRc<Option<TaskHandle>>;

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for DebounceOp<S, SD>
where
  S: Observable<Item, Err, DebounceObserver<O, SD, Item>>,
  SD: Scheduler,
  O: Observer<Item, Err> + 'static,
  Item: 'static,
{
  type Unsub = TupleSubscription<S::Unsub, PendingTask>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Self { source, scheduler, duration } = self;
    let pending = MutRc::own(None);
    let observer = DebounceObserver {
      observer: MutRc::own(Some(observer)),
      delay: duration,
      scheduler,
      trailing_value: MutRc::own(None),
      pending: pending.clone(),
    };
    let u = source.actual_subscribe(observer);
    TupleSubscription::new(u, pending)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for DebounceOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct DebounceObserver<O, SD, Item> {
  observer: MutRc<Option<O>>,
  scheduler: SD,
  delay: Duration,
  trailing_value: MutRc<Option<Item>>,
  pending: PendingTask,
}

impl<O, SD, Item> DebounceObserver<O, SD, Item> {
  fn cancel_pending(&self) {
    let previous = self.pending.rc_deref_mut().take();
    if let Some(previous) = previous {
      previous.unsubscribe();
    }
  }
}

impl<Item, Err, O, SD> Observer<Item, Err> for DebounceObserver<O, SD, Item>
where
  O: Observer<Item, Err> + 'static,
  SD: Scheduler,
  Item: 'static,
{
  fn next(&mut self, value: Item) {
    *self.trailing_value.rc_deref_mut() = Some(value);
    self.cancel_pending();

    let mut observer = self.observer.clone();
    let trailing = self.trailing_value.clone();
    let handle = self.scheduler.schedule(
      move || {
        let value = trailing.rc_deref_mut().take();
        if let Some(value) = value {
          observer.next(value);
        }
      },
      Some(self.delay),
    );
    *self.pending.rc_deref_mut() = Some(handle);
  }

  fn error(self, err: Err) {
    self.cancel_pending();
    self.observer.error(err);
  }

  fn complete(mut self) {
    self.cancel_pending();
    let value = self.trailing_value.rc_deref_mut().take();
    if let Some(value) = value {
      self.observer.next(value);
    }
    self.observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
