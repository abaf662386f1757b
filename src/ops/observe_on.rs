use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::MutRc,
  scheduler::Scheduler,
  subscription::{LocalSubscription, Subscription, TupleSubscription},
};

/// Re-delivers every notification as a task on another scheduler.
///
/// This is the hand-off point between execution contexts: the source runs
/// wherever it was scheduled, the observer only ever runs on `scheduler`.
/// Order is preserved because every task is queued without delay.
#[derive(Clone)]
pub struct ObserveOnOp<S, SD> {
  pub(crate) source: S,
  pub(crate) scheduler: SD,
}

impl<S, SD, Item, Err, O> Observable<Item, Err, O> for ObserveOnOp<S, SD>
where
  S: Observable<Item, Err, ObserveOnObserver<O, SD>>,
  O: Observer<Item, Err> + 'static,
  SD: Scheduler,
  Item: 'static,
  Err: 'static,
{
  type Unsub = TupleSubscription<S::Unsub, LocalSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let pending = LocalSubscription::default();
    let observer = ObserveOnObserver {
      observer: MutRc::own(Some(observer)),
      scheduler: self.scheduler,
      pending: pending.clone(),
    };
    let u = self.source.actual_subscribe(observer);
    TupleSubscription::new(u, pending)
  }
}

impl<S, SD, Item, Err> ObservableExt<Item, Err> for ObserveOnOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct ObserveOnObserver<O, SD> {
  observer: MutRc<Option<O>>,
  scheduler: SD,
  pending: LocalSubscription,
}

impl<O, SD: Scheduler> ObserveOnObserver<O, SD> {
  fn schedule(&self, task: impl FnOnce() + 'static) {
    if !self.pending.is_closed() {
      let handle = self.scheduler.schedule(task, None);
      self.pending.add(handle);
    }
  }
}

impl<Item, Err, O, SD> Observer<Item, Err> for ObserveOnObserver<O, SD>
where
  O: Observer<Item, Err> + 'static,
  SD: Scheduler,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, value: Item) {
    let mut observer = self.observer.clone();
    self.schedule(move || observer.next(value));
  }

  fn error(self, err: Err) {
    let observer = self.observer.clone();
    self.schedule(move || observer.error(err));
  }

  fn complete(self) {
    let observer = self.observer.clone();
    self.schedule(move || Observer::<Item, Err>::complete(observer));
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::{prelude::*, scheduler::TestScheduler};

  #[rxflow_macro::test]
  fn delivers_on_target_scheduler_in_order() {
    TestScheduler::init();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());

    observable::from_iter(1..=3)
      .observe_on(TestScheduler)
      .subscribe_all(
        move |v| l1.borrow_mut().push(format!("next {v}")),
        |e: Infallible| match e {},
        move || l2.borrow_mut().push("complete".to_owned()),
      );

    assert!(log.borrow().is_empty());
    TestScheduler::advance_by(Duration::ZERO);
    assert_eq!(*log.borrow(), vec!["next 1", "next 2", "next 3", "complete"]);
  }

  #[rxflow_macro::test]
  fn unsubscribe_drops_queued_notifications() {
    TestScheduler::init();
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();

    let sub = observable::from_iter(1..=3)
      .observe_on(TestScheduler)
      .subscribe(move |v| s.borrow_mut().push(v));
    sub.unsubscribe();

    TestScheduler::flush();
    assert!(seen.borrow().is_empty());
  }
}
