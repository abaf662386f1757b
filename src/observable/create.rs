use std::marker::PhantomData;

use crate::{
  observable::{Observable, ObservableExt},
  observer::{Emitter, Observer},
  subscription::Subscription,
};

/// Creates an observable from a function that drives an [`Emitter`].
///
/// The function runs on every subscription and returns the subscription that
/// tears down whatever it set up. Events after the first terminal event are
/// ignored.
///
/// ```
/// use rxflow::prelude::*;
///
/// observable::create(|emitter: &mut dyn Emitter<i32, Infallible>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(|v| println!("{v}"));
/// ```
pub fn create<F, Item, Err, U>(f: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { f, _marker: PhantomData }
}

#[derive(Clone)]
pub struct Create<F, Item, Err> {
  f: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

/// Adapts an observer to the [`Emitter`] interface handed to `create`.
pub struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(observer) = self.0.take() {
      observer.complete();
    }
  }
}

impl<F, Item, Err, O, U> Observable<Item, Err, O> for Create<F, Item, Err>
where
  O: Observer<Item, Err>,
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  type Unsub = U;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F, Item, Err> {}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::{prelude::*, subscription::ClosureSubscription};

  #[rxflow_macro::test]
  fn emits_until_terminal_event() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());

    observable::create(|emitter: &mut dyn Emitter<i32, &'static str>| {
      emitter.next(1);
      emitter.error("bad");
      emitter.next(2);
      emitter.complete();
    })
    .subscribe_all(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      move |e| l2.borrow_mut().push(format!("error {e}")),
      move || l3.borrow_mut().push("complete".to_owned()),
    );

    assert_eq!(*log.borrow(), vec!["next 1".to_owned(), "error bad".to_owned()]);
  }

  #[rxflow_macro::test]
  fn returns_the_teardown() {
    let torn_down = Rc::new(RefCell::new(false));
    let t = torn_down.clone();

    let sub = observable::create(move |emitter: &mut dyn Emitter<i32, Infallible>| {
      emitter.next(1);
      ClosureSubscription(move || *t.borrow_mut() = true)
    })
    .subscribe(|_| {});

    assert!(!*torn_down.borrow());
    sub.unsubscribe();
    assert!(*torn_down.borrow());
  }
}
