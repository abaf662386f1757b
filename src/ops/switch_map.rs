//! SwitchMap operator
//!
//! Maps each source value to an inner observable and forwards items from only
//! the most recently created one. When a new inner observable is produced,
//! the previous one is unsubscribed.
//!
//! - Only the latest inner observable's emissions are forwarded downstream.
//! - The operator completes after the source and the current inner
//!   observable have both completed.
//! - Errors from the source or from the current inner observable are
//!   propagated immediately.
//!
//! Every inner subscription is tagged with a generation number. Events from a
//! superseded generation are dropped, so a late emission that races the
//! cancellation can never reach the observer.

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{BoxedSubscription, IntoBoxedSubscription, Subscription, TupleSubscription},
  type_hint::TypeHint,
};

#[derive(Clone)]
pub struct SwitchMapOp<S, F, Item> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _hint: TypeHint<Item>,
}

struct SwitchState<O> {
  observer: Option<O>,
  outer_completed: bool,
  inner: Option<BoxedSubscription>,
  inner_active: bool,
  generation: usize,
}

impl<O> SwitchState<O> {
  fn take_inner(&mut self) -> Option<BoxedSubscription> {
    self.inner_active = false;
    self.inner.take()
  }
}

pub struct SwitchMapOuterObserver<O, F, B> {
  state: MutRc<SwitchState<O>>,
  func: F,
  _hint: TypeHint<B>,
}

pub struct SwitchMapInnerObserver<O> {
  state: MutRc<SwitchState<O>>,
  generation: usize,
}

/// Unsubscribes the current inner observable and detaches the observer.
pub struct SwitchMapSubscription<O>(MutRc<SwitchState<O>>);

impl<O> Subscription for SwitchMapSubscription<O> {
  fn unsubscribe(self) {
    let (inner, observer) = {
      let mut st = self.0.rc_deref_mut();
      (st.take_inner(), st.observer.take())
    };
    drop(observer);
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().observer.is_none() }
}

impl<Item, B, Err, O, S, F, R> Observable<B, Err, O> for SwitchMapOp<S, F, Item>
where
  S: Observable<Item, Err, SwitchMapOuterObserver<O, F, B>>,
  F: FnMut(Item) -> R,
  R: Observable<B, Err, SwitchMapInnerObserver<O>>,
  R::Unsub: 'static,
  O: Observer<B, Err>,
{
  type Unsub = TupleSubscription<S::Unsub, SwitchMapSubscription<O>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutRc::own(SwitchState {
      observer: Some(observer),
      outer_completed: false,
      inner: None,
      inner_active: false,
      generation: 0,
    });
    let outer = SwitchMapOuterObserver { state: state.clone(), func: self.func, _hint: TypeHint::new() };
    let source_unsub = self.source.actual_subscribe(outer);
    TupleSubscription::new(source_unsub, SwitchMapSubscription(state))
  }
}

impl<Item, B, Err, S, F, R> ObservableExt<B, Err> for SwitchMapOp<S, F, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Item) -> R,
{
}

impl<Item, B, Err, O, F, R> Observer<Item, Err> for SwitchMapOuterObserver<O, F, B>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> R,
  R: Observable<B, Err, SwitchMapInnerObserver<O>>,
  R::Unsub: 'static,
{
  fn next(&mut self, value: Item) {
    let (previous, generation) = {
      let mut st = self.state.rc_deref_mut();
      if st.observer.is_none() {
        return;
      }
      st.generation += 1;
      let previous = st.take_inner();
      st.inner_active = true;
      (previous, st.generation)
    };
    // The previous inner may touch the shared state while tearing down.
    if let Some(previous) = previous {
      tracing::debug!(generation, "switch_map cancelled the previous inner stream");
      previous.unsubscribe();
    }

    let inner = (self.func)(value);
    let unsub = inner.actual_subscribe(SwitchMapInnerObserver { state: self.state.clone(), generation });

    let mut st = self.state.rc_deref_mut();
    if st.generation == generation && st.inner_active {
      st.inner = Some(unsub.into_boxed());
    } else {
      drop(st);
      unsub.unsubscribe();
    }
  }

  fn error(self, err: Err) {
    let (inner, observer) = {
      let mut st = self.state.rc_deref_mut();
      (st.take_inner(), st.observer.take())
    };
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = {
      let mut st = self.state.rc_deref_mut();
      st.outer_completed = true;
      if st.inner_active {
        None
      } else {
        st.observer.take()
      }
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .state
      .rc_deref()
      .observer
      .as_ref()
      .is_none_or(O::is_finished)
  }
}

impl<O> SwitchMapInnerObserver<O> {
  fn is_current(&self) -> bool { self.state.rc_deref().generation == self.generation }
}

impl<Item, Err, O> Observer<Item, Err> for SwitchMapInnerObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let mut st = self.state.rc_deref_mut();
    if st.generation != self.generation {
      return;
    }
    if let Some(observer) = st.observer.as_mut() {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    if !self.is_current() {
      return;
    }
    let (inner, observer) = {
      let mut st = self.state.rc_deref_mut();
      (st.take_inner(), st.observer.take())
    };
    drop(inner);
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    if !self.is_current() {
      return;
    }
    let observer = {
      let mut st = self.state.rc_deref_mut();
      st.take_inner();
      if st.outer_completed {
        st.observer.take()
      } else {
        None
      }
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    let st = self.state.rc_deref();
    st.generation != self.generation || st.observer.as_ref().is_none_or(O::is_finished)
  }
}
