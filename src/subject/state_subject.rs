use std::convert::Infallible;

use super::{Subject, SubjectSubscription};
use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A single-slot state holder that always has a current value.
///
/// Subscribers receive the current value first, then every later change.
/// Writing a value equal to the current one changes nothing and notifies
/// nobody. It never fails, so the error type is `Infallible`.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxflow::prelude::*;
///
/// let query = StateSubject::new(String::new());
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
/// query.clone().subscribe(move |v| s.borrow_mut().push(v));
///
/// query.set("rust".to_owned());
/// query.set("rust".to_owned());
/// assert_eq!(*seen.borrow(), vec!["".to_owned(), "rust".to_owned()]);
/// ```
pub struct StateSubject<Item> {
  value: MutRc<Item>,
  subject: Subject<Item, Infallible>,
}

impl<Item> Clone for StateSubject<Item> {
  fn clone(&self) -> Self { Self { value: self.value.clone(), subject: self.subject.clone() } }
}

impl<Item: Default> Default for StateSubject<Item> {
  fn default() -> Self { Self::new(Item::default()) }
}

impl<Item> StateSubject<Item> {
  pub fn new(value: Item) -> Self { Self { value: MutRc::own(value), subject: Subject::default() } }

  /// The current value.
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.value.rc_deref().clone()
  }

  /// Replaces the current value and notifies subscribers, unless `value`
  /// equals the current one.
  pub fn set(&self, value: Item)
  where
    Item: PartialEq + Clone,
  {
    {
      let mut current = self.value.rc_deref_mut();
      if *current == value {
        return;
      }
      *current = value.clone();
    }
    self.subject.broadcast(value);
  }

  /// Number of observers currently subscribed.
  pub fn observer_count(&self) -> usize { self.subject.observer_count() }
}

impl<Item> Observer<Item, Infallible> for StateSubject<Item>
where
  Item: PartialEq + Clone,
{
  #[inline]
  fn next(&mut self, value: Item) { self.set(value) }

  fn error(self, err: Infallible) { match err {} }

  fn complete(self) { self.subject.complete() }

  fn is_finished(&self) -> bool { self.subject.is_stopped() }
}

impl<Item, O> Observable<Item, Infallible, O> for StateSubject<Item>
where
  O: Observer<Item, Infallible> + 'static,
  Item: Clone,
{
  type Unsub = SubjectSubscription<Item, Infallible>;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    if !self.subject.is_stopped() {
      observer.next(self.value());
      if observer.is_finished() {
        return SubjectSubscription::closed();
      }
    }
    self.subject.actual_subscribe(observer)
  }
}

impl<Item> ObservableExt<Item, Infallible> for StateSubject<Item> {}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxflow_macro::test]
  fn replays_current_value_on_subscribe() {
    let cell = StateSubject::new(1);
    cell.set(2);

    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    cell.clone().subscribe(move |v| s.borrow_mut().push(v));
    cell.set(3);

    assert_eq!(*seen.borrow(), vec![2, 3]);
    assert_eq!(cell.value(), 3);
  }

  #[rxflow_macro::test]
  fn equal_writes_are_conflated() {
    let cell = StateSubject::new("a".to_owned());
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    cell.clone().subscribe(move |v| s.borrow_mut().push(v));

    cell.set("b".to_owned());
    cell.set("b".to_owned());
    cell.set("a".to_owned());

    assert_eq!(*seen.borrow(), vec!["a", "b", "a"]);
  }

  #[rxflow_macro::test]
  fn write_from_a_subscriber_reaches_the_others() {
    let cell = StateSubject::new(0);
    let (writer, c) = (Rc::new(RefCell::new(vec![])), cell.clone());
    let w = writer.clone();
    cell.clone().subscribe(move |v| {
      w.borrow_mut().push(v);
      if v == 1 {
        c.set(2);
      }
    });
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    cell.clone().subscribe(move |v| s.borrow_mut().push(v));

    cell.set(1);
    assert_eq!(cell.value(), 2);
    assert_eq!(*writer.borrow(), vec![0, 1, 2]);
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
  }

  #[rxflow_macro::test]
  fn works_as_an_observer() {
    let mut cell = StateSubject::new(0);
    observable::from_iter(1..=3).subscribe_with(cell.clone());
    assert_eq!(cell.value(), 3);

    cell.next(9);
    assert_eq!(cell.value(), 9);
  }

  #[rxflow_macro::test]
  fn take_one_does_not_register() {
    let cell = StateSubject::new(5);
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    cell.clone().take(1).subscribe(move |v| s.borrow_mut().push(v));

    cell.set(6);
    assert_eq!(*seen.borrow(), vec![5]);
    assert_eq!(cell.observer_count(), 0);
  }
}
