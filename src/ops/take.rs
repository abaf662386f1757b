use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Emits only the first `count` values, then completes without waiting for
/// the source.
///
/// ```
/// use rxflow::prelude::*;
///
/// observable::from_iter(0..10).take(5).subscribe(|v| println!("{v}"));
/// ```
#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  count: usize,
  hits: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeOp<S>
where
  S: Observable<Item, Err, TakeObserver<O>>,
  O: Observer<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = if self.count == 0 {
      observer.complete();
      None
    } else {
      Some(observer)
    };
    self
      .source
      .actual_subscribe(TakeObserver { observer, count: self.count, hits: 0 })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeOp<S> where S: ObservableExt<Item, Err> {}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    self.hits += 1;
    observer.next(value);
    if self.hits >= self.count {
      if let Some(observer) = self.observer.take() {
        observer.complete();
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxflow_macro::test]
  fn base_function() {
    let completed = Rc::new(RefCell::new(0));
    let next_count = Rc::new(RefCell::new(0));
    let (c, n) = (completed.clone(), next_count.clone());

    observable::from_iter(0..100).take(5).subscribe_all(
      move |_| *n.borrow_mut() += 1,
      |e: Infallible| match e {},
      move || *c.borrow_mut() += 1,
    );

    assert_eq!(*completed.borrow(), 1);
    assert_eq!(*next_count.borrow(), 5);
  }

  #[rxflow_macro::test]
  fn take_zero_completes_immediately() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());

    observable::from_iter(0..3).take(0).subscribe_all(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      |e: Infallible| match e {},
      move || l2.borrow_mut().push("complete".to_owned()),
    );

    assert_eq!(*log.borrow(), vec!["complete".to_owned()]);
  }

  #[rxflow_macro::test]
  fn shorter_source_completes_normally() {
    let completed = Rc::new(RefCell::new(0));
    let c = completed.clone();
    observable::from_iter(0..2)
      .take(5)
      .on_complete(move || *c.borrow_mut() += 1)
      .subscribe(|_| {});
    assert_eq!(*completed.borrow(), 1);
  }
}
