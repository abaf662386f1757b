use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  rc::{MutRc, RcDerefMut},
  subscription::{BoxedSubscription, IntoBoxedSubscription, TupleSubscription},
  type_hint::TypeHint,
};

/// Replaces an upstream error with a fallback observable.
///
/// `func` receives the error and returns the observable to continue with.
/// The observer is handed over to it, so the stream ends however the fallback
/// ends.
///
/// ```
/// use rxflow::prelude::*;
///
/// observable::throw_err::<String, _>("offline")
///   .catch_error(|_| observable::of(String::new()))
///   .subscribe(|v| assert!(v.is_empty()));
/// ```
#[derive(Clone)]
pub struct CatchErrorOp<S, F, Err> {
  pub(crate) source: S,
  pub(crate) func: F,
  pub(crate) _hint: TypeHint<Err>,
}

type FallbackSlot = MutRc<Option<BoxedSubscription>>;

pub struct CatchObserver<O, F, OutErr> {
  observer: O,
  func: F,
  fallback: FallbackSlot,
  _hint: TypeHint<OutErr>,
}

impl<Item, Err, OutErr, O, S, F, R> Observable<Item, OutErr, O> for CatchErrorOp<S, F, Err>
where
  S: Observable<Item, Err, CatchObserver<O, F, OutErr>>,
  F: FnOnce(Err) -> R,
  R: Observable<Item, OutErr, O>,
  R::Unsub: 'static,
  O: Observer<Item, OutErr>,
{
  type Unsub = TupleSubscription<S::Unsub, FallbackSlot>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let fallback = MutRc::own(None);
    let observer =
      CatchObserver { observer, func: self.func, fallback: fallback.clone(), _hint: TypeHint::new() };
    let unsub = self.source.actual_subscribe(observer);
    TupleSubscription::new(unsub, fallback)
  }
}

impl<Item, Err, OutErr, S, F, R> ObservableExt<Item, OutErr> for CatchErrorOp<S, F, Err>
where
  S: ObservableExt<Item, Err>,
  F: FnOnce(Err) -> R,
  R: ObservableExt<Item, OutErr>,
{
}

impl<Item, Err, OutErr, O, F, R> Observer<Item, Err> for CatchObserver<O, F, OutErr>
where
  O: Observer<Item, OutErr>,
  F: FnOnce(Err) -> R,
  R: Observable<Item, OutErr, O>,
  R::Unsub: 'static,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) {
    let fallback = (self.func)(err);
    let unsub = fallback.actual_subscribe(self.observer);
    *self.fallback.rc_deref_mut() = Some(unsub.into_boxed());
  }

  fn complete(self) { self.observer.complete() }

  fn is_finished(&self) -> bool { self.observer.is_finished() }
}
