//! Subscriptions: handles returned by `subscribe` that cancel the work a
//! subscription started.

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use smallvec::SmallVec;

mod boxed;
mod tuple;

pub use boxed::{BoxedSubscription, IntoBoxedSubscription};
pub use tuple::TupleSubscription;

/// Handle to an active subscription.
///
/// `unsubscribe` consumes the handle. Handles that need to be cancelled from
/// several places are cheap clones of a shared cell (`LocalSubscription`,
/// `TaskHandle`).
pub trait Subscription {
  /// Deregister before the stream has finished delivering its events.
  fn unsubscribe(self);

  fn is_closed(&self) -> bool;
}

/// Synchronous sources are done by the time `subscribe` returns.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<U: Subscription> Subscription for Option<U> {
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().is_none_or(U::is_closed) }
}

// ============================================================================
// LocalSubscription
// ============================================================================

/// A shared set of teardown subscriptions.
///
/// Clones share the same set. Unsubscribing any clone closes the set and
/// unsubscribes every member. Members added after that are unsubscribed
/// immediately.
#[derive(Clone, Default)]
pub struct LocalSubscription(Rc<RefCell<Inner>>);

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxedSubscription; 1]>,
}

impl LocalSubscription {
  pub fn add<S: Subscription + 'static>(&self, subscription: S) {
    let mut inner = self.0.borrow_mut();
    if inner.closed {
      drop(inner);
      subscription.unsubscribe();
    } else {
      inner.teardown.retain(|v| !v.is_closed());
      inner.teardown.push(BoxedSubscription::new(subscription));
    }
  }

  /// Number of members still registered.
  pub fn teardown_size(&self) -> usize { self.0.borrow().teardown.len() }
}

impl Subscription for LocalSubscription {
  fn unsubscribe(self) {
    // Take the members out first: their teardown may add to this set again.
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    for v in teardown {
      v.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.borrow().closed }
}

impl Debug for LocalSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("LocalSubscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

// ============================================================================
// ClosureSubscription
// ============================================================================

/// Runs a closure on unsubscribe. Used by `create` callers to release
/// resources they set up.
pub struct ClosureSubscription<F: FnOnce()>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  fn unsubscribe(self) { (self.0)() }

  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// SubscriptionGuard
// ============================================================================

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  /// Give up the guard without unsubscribing.
  pub fn into_inner(mut self) -> Option<T> { self.0.take() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(inner) = self.0.take() {
      inner.unsubscribe()
    }
  }
}
