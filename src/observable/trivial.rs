use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  type_hint::TypeHint,
};

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

#[derive(Clone)]
pub struct Empty<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete(); }
}

impl<Item> ObservableExt<Item, Infallible> for Empty<Item> {}

/// Creates an observable that emits no items, just terminates with `err`.
pub fn throw_err<Item, Err>(err: Err) -> ThrowErr<Item, Err> {
  ThrowErr { err, _hint: TypeHint::new() }
}

#[derive(Clone)]
pub struct ThrowErr<Item, Err> {
  err: Err,
  _hint: TypeHint<Item>,
}

impl<Item, Err, O> Observable<Item, Err, O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.err); }
}

impl<Item, Err> ObservableExt<Item, Err> for ThrowErr<Item, Err> {}
