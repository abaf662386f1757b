use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscription::Subscription,
};

/// Runs a closure once the stream terminates, whichever way: completion,
/// error or unsubscribe.
#[derive(Clone)]
pub struct FinalizeOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for FinalizeOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, FinalizerObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = FinalizerSubscription<S::Unsub, F>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let func = MutRc::own(Some(self.func));
    let subscription = self
      .source
      .actual_subscribe(FinalizerObserver { observer, func: func.clone() });
    FinalizerSubscription { subscription, func }
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for FinalizeOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct FinalizerObserver<O, F> {
  observer: O,
  func: MutRc<Option<F>>,
}

fn run_once<F: FnOnce()>(func: &MutRc<Option<F>>) {
  let func = func.rc_deref_mut().take();
  if let Some(func) = func {
    func()
  }
}

impl<Item, Err, O, F> Observer<Item, Err> for FinalizerObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  fn error(self, err: Err) {
    self.observer.error(err);
    run_once(&self.func);
  }

  fn complete(self) {
    self.observer.complete();
    run_once(&self.func);
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

pub struct FinalizerSubscription<U, F> {
  subscription: U,
  func: MutRc<Option<F>>,
}

impl<U, F> Subscription for FinalizerSubscription<U, F>
where
  U: Subscription,
  F: FnOnce(),
{
  fn unsubscribe(self) {
    self.subscription.unsubscribe();
    run_once(&self.func);
  }

  #[inline]
  fn is_closed(&self) -> bool { self.subscription.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use crate::prelude::*;

  #[rxflow_macro::test]
  fn finalize_on_complete_simple() {
    let finalized = Rc::new(Cell::new(false));
    let nexted = Rc::new(Cell::new(false));
    let (f, n) = (finalized.clone(), nexted.clone());

    observable::of(1)
      .finalize(move || f.set(true))
      .subscribe(move |_| n.set(true));

    assert!(finalized.get());
    assert!(nexted.get());
  }

  #[rxflow_macro::test]
  fn finalize_on_unsubscribe() {
    let finalized = Rc::new(Cell::new(0));
    let nexted = Rc::new(Cell::new(false));
    let mut s = Subject::<i32, Infallible>::default();

    let (f, n) = (finalized.clone(), nexted.clone());
    let subscription = s
      .clone()
      .finalize(move || f.set(f.get() + 1))
      .subscribe(move |_| n.set(true));
    s.next(1);
    assert_eq!(finalized.get(), 0);

    subscription.unsubscribe();
    s.complete();
    assert_eq!(finalized.get(), 1);
    assert!(nexted.get());
  }

  #[rxflow_macro::test]
  fn finalize_on_error() {
    let finalized = Rc::new(Cell::new(false));
    let errored = Rc::new(Cell::new(false));
    let s = Subject::<i32, &'static str>::default();

    let (f, e) = (finalized.clone(), errored.clone());
    s.clone()
      .finalize(move || f.set(true))
      .subscribe_all(|_| {}, move |_| e.set(true), || {});
    s.error("oops");

    assert!(finalized.get());
    assert!(errored.get());
  }
}
