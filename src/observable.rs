//! Observables and the operator surface.
//!
//! An [`Observable`] is a cold producer: nothing happens until
//! `actual_subscribe` hands it an observer, and every subscription runs the
//! producer again. [`ObservableExt`] carries the operators and the
//! convenience `subscribe*` methods.

use std::time::Duration;

use crate::{
  observer::{BoxedObserver, FnMutObserver, Observer, ObserverAll},
  ops::{
    catch_error::CatchErrorOp, debounce::DebounceOp, delay::DelayOp,
    distinct_until_changed::DistinctUntilChangedOp, filter::FilterOp, finalize::FinalizeOp,
    map::MapOp, map_err::MapErrOp, observe_on::ObserveOnOp, on_complete::OnCompleteOp,
    switch_map::SwitchMapOp, take::TakeOp, tap::TapOp,
  },
  scheduler::Scheduler,
  subscription::Subscription,
  type_hint::TypeHint,
};

mod boxed;
mod create;
mod defer;
mod from_iter;
mod interval;
mod of;
mod trivial;

pub use boxed::{BoxOp, BoxSubscribe};
pub use create::{create, Create, CreateEmitter};
pub use defer::{defer, Defer};
pub use from_iter::{from_iter, FromIter};
pub use interval::{interval, Interval};
pub use of::{of, Of};
pub use trivial::{empty, throw_err, Empty, ThrowErr};

/// A producer of `Item`s that can fail with `Err`, subscribable by `O`.
///
/// The observer type is a trait parameter so every operator chain is fully
/// monomorphised. Bounds live on the implementations.
pub trait Observable<Item, Err, O> {
  /// Handle returned by `actual_subscribe`.
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

pub trait ObservableExt<Item, Err>: Sized {
  /// Transforms every value with `f`.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp { source: self, func: f, _hint: TypeHint::new() }
  }

  /// Transforms the error with `f`.
  #[inline]
  fn map_err<B, F>(self, f: F) -> MapErrOp<Self, F, Err>
  where
    F: FnOnce(Err) -> B,
  {
    MapErrOp { source: self, func: f, _hint: TypeHint::new() }
  }

  /// Emits only the values for which `filter` returns `true`.
  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp { source: self, filter }
  }

  /// Runs `f` for every value before passing it on unchanged.
  #[inline]
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Item),
  {
    TapOp { source: self, func: f }
  }

  /// Emits at most `count` values, then completes.
  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp { source: self, count } }

  /// Shifts every value and the completion `delay` later on `scheduler`.
  /// Errors are not delayed.
  #[inline]
  fn delay<SD>(self, delay: Duration, scheduler: SD) -> DelayOp<Self, SD>
  where
    SD: Scheduler,
  {
    DelayOp { source: self, delay, scheduler }
  }

  /// Emits a value only once `duration` has passed without another value.
  ///
  /// A pending value is flushed when the source completes.
  #[inline]
  fn debounce<SD>(self, duration: Duration, scheduler: SD) -> DebounceOp<Self, SD>
  where
    SD: Scheduler,
  {
    DebounceOp { source: self, duration, scheduler }
  }

  /// Drops values equal to the previous emitted one.
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self>
  where
    Item: PartialEq + Clone,
  {
    DistinctUntilChangedOp { source: self }
  }

  /// Maps every value to an inner observable and mirrors only the most
  /// recent one. A new value unsubscribes the previous inner observable.
  #[inline]
  fn switch_map<R, F>(self, f: F) -> SwitchMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> R,
  {
    SwitchMapOp { source: self, func: f, _hint: TypeHint::new() }
  }

  /// Alias of [`switch_map`](ObservableExt::switch_map).
  #[inline]
  fn flat_map_latest<R, F>(self, f: F) -> SwitchMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> R,
  {
    self.switch_map(f)
  }

  /// Replaces an error with the observable returned by `f`.
  #[inline]
  fn catch_error<R, F>(self, f: F) -> CatchErrorOp<Self, F, Err>
  where
    F: FnOnce(Err) -> R,
  {
    CatchErrorOp { source: self, func: f, _hint: TypeHint::new() }
  }

  /// Runs `f` when the source completes, before forwarding the completion.
  #[inline]
  fn on_complete<F>(self, f: F) -> OnCompleteOp<Self, F>
  where
    F: FnOnce(),
  {
    OnCompleteOp { source: self, func: f }
  }

  /// Runs `f` once when the stream completes, errors or is unsubscribed.
  #[inline]
  fn finalize<F>(self, f: F) -> FinalizeOp<Self, F>
  where
    F: FnOnce(),
  {
    FinalizeOp { source: self, func: f }
  }

  /// Re-emits every notification through `scheduler`.
  #[inline]
  fn observe_on<SD>(self, scheduler: SD) -> ObserveOnOp<Self, SD>
  where
    SD: Scheduler,
  {
    ObserveOnOp { source: self, scheduler }
  }

  /// Erases the concrete type of this chain.
  #[inline]
  fn box_it(self) -> BoxOp<Item, Err>
  where
    Self: Observable<Item, Err, BoxedObserver<Item, Err>> + 'static,
    <Self as Observable<Item, Err, BoxedObserver<Item, Err>>>::Unsub: 'static,
  {
    BoxOp::new(self)
  }

  /// Subscribes with a `next` closure. Only available for streams that
  /// cannot fail.
  #[inline]
  fn subscribe<N>(self, next: N) -> <Self as Observable<Item, Err, FnMutObserver<N>>>::Unsub
  where
    N: FnMut(Item),
    Self: Observable<Item, Err, FnMutObserver<N>>,
  {
    self.actual_subscribe(FnMutObserver(next))
  }

  /// Subscribes with one closure per notification kind.
  #[inline]
  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> <Self as Observable<Item, Err, ObserverAll<N, E, C>>>::Unsub
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, ObserverAll<N, E, C>>,
  {
    self.actual_subscribe(ObserverAll::new(next, error, complete))
  }

  /// Subscribes an existing observer.
  #[inline]
  fn subscribe_with<O>(self, observer: O) -> <Self as Observable<Item, Err, O>>::Unsub
  where
    O: Observer<Item, Err>,
    Self: Observable<Item, Err, O>,
  {
    self.actual_subscribe(observer)
  }
}
