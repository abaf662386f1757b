use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  type_hint::TypeHint,
};

/// Creates an observable that calls `f` on every subscription and subscribes
/// to the observable it returns.
///
/// ```
/// use rxflow::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::of("Hello!")
/// })
/// .subscribe(|v| println!("{v}"));
/// ```
pub fn defer<F, R, Item, Err>(f: F) -> Defer<F, Item, Err>
where
  F: FnOnce() -> R,
{
  Defer(f, TypeHint::new())
}

#[derive(Clone)]
pub struct Defer<F, Item, Err>(F, TypeHint<(Item, Err)>);

impl<F, R, Item, Err, O> Observable<Item, Err, O> for Defer<F, Item, Err>
where
  F: FnOnce() -> R,
  R: Observable<Item, Err, O>,
  O: Observer<Item, Err>,
{
  type Unsub = R::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { (self.0)().actual_subscribe(observer) }
}

impl<F, R, Item, Err> ObservableExt<Item, Err> for Defer<F, Item, Err> where F: FnOnce() -> R {}
