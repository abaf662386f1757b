use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Stops early once the observer reports it is finished.
///
/// ```
/// use rxflow::prelude::*;
///
/// observable::from_iter(0..10).subscribe(|v| println!("{v}"));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator,
{
  FromIter(iter)
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<O, Iter> Observable<Iter::Item, Infallible, O> for FromIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for v in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(v);
    }
    observer.complete();
  }
}

impl<Iter> ObservableExt<Iter::Item, Infallible> for FromIter<Iter> where Iter: IntoIterator {}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxflow_macro::test]
  fn from_range() {
    let hit_count = Rc::new(RefCell::new(0));
    let completed = Rc::new(RefCell::new(false));
    let (h, c) = (hit_count.clone(), completed.clone());

    observable::from_iter(0..100)
      .on_complete(move || *c.borrow_mut() = true)
      .subscribe(move |_| *h.borrow_mut() += 1);

    assert_eq!(*hit_count.borrow(), 100);
    assert!(*completed.borrow());
  }

  #[rxflow_macro::test]
  fn stops_when_downstream_is_done() {
    let pulled = Rc::new(RefCell::new(vec![]));
    let p = pulled.clone();

    observable::from_iter((0..).inspect(move |v| p.borrow_mut().push(*v)))
      .take(3)
      .subscribe(|_| {});

    assert_eq!(*pulled.borrow(), vec![0, 1, 2, 3]);
  }
}
