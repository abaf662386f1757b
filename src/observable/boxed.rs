//! Type-erased observables.
//!
//! `box_it()` turns any chain into a [`BoxOp`], so functions and trait
//! objects can return streams without naming the operator types.

use crate::{
  observable::{Observable, ObservableExt},
  observer::{BoxedObserver, Observer},
  subscription::{BoxedSubscription, IntoBoxedSubscription},
};

/// Object-safe view of an observable subscribed with a boxed observer.
pub trait BoxSubscribe<Item, Err> {
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<Item, Err>) -> BoxedSubscription;
}

impl<Item, Err, T> BoxSubscribe<Item, Err> for T
where
  T: Observable<Item, Err, BoxedObserver<Item, Err>>,
  T::Unsub: 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxedObserver<Item, Err>) -> BoxedSubscription {
    (*self).actual_subscribe(observer).into_boxed()
  }
}

/// A boxed observable of `Item`s failing with `Err`.
pub struct BoxOp<Item, Err>(Box<dyn BoxSubscribe<Item, Err>>);

impl<Item, Err> BoxOp<Item, Err> {
  pub fn new<T>(source: T) -> Self
  where
    T: Observable<Item, Err, BoxedObserver<Item, Err>> + 'static,
    T::Unsub: 'static,
  {
    BoxOp(Box::new(source))
  }
}

impl<Item, Err, O> Observable<Item, Err, O> for BoxOp<Item, Err>
where
  O: Observer<Item, Err> + 'static,
{
  type Unsub = BoxedSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.0.box_subscribe(Box::new(observer)) }
}

impl<Item, Err> ObservableExt<Item, Err> for BoxOp<Item, Err> {}
