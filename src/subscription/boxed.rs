use super::Subscription;

/// Object-safe mirror of [`Subscription`]. `unsubscribe(self)` needs a sized
/// receiver, this takes `Box<Self>`.
pub trait BoxedSubscriptionInner {
  fn boxed_unsubscribe(self: Box<Self>);
  fn boxed_is_closed(&self) -> bool;
}

impl<T: Subscription> BoxedSubscriptionInner for T {
  #[inline]
  fn boxed_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn boxed_is_closed(&self) -> bool { self.is_closed() }
}

/// A type-erased subscription.
///
/// Subscriptions are control handles, not data views: they are stored and
/// called at an arbitrary later time (a switch-map's current inner, a
/// lifecycle scope's children), so the boxed value must be `'static`.
pub struct BoxedSubscription(Box<dyn BoxedSubscriptionInner>);

impl BoxedSubscription {
  #[inline]
  pub fn new(subscription: impl Subscription + 'static) -> Self { Self(Box::new(subscription)) }
}

/// Method-call sugar for `BoxedSubscription::new`.
pub trait IntoBoxedSubscription {
  fn into_boxed(self) -> BoxedSubscription;
}

impl<T: Subscription + 'static> IntoBoxedSubscription for T {
  #[inline]
  fn into_boxed(self) -> BoxedSubscription { BoxedSubscription::new(self) }
}

impl Subscription for BoxedSubscription {
  #[inline]
  fn unsubscribe(self) { self.0.boxed_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.boxed_is_closed() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subscription::test_util::MockSubscription;

  #[rxflow_macro::test]
  fn boxed_forwards_unsubscribe() {
    let (mock, closed) = MockSubscription::new();
    let boxed = BoxedSubscription::new(mock);

    assert!(!boxed.is_closed());
    boxed.unsubscribe();
    assert!(closed.get());
  }

  #[rxflow_macro::test]
  fn boxed_unit_is_closed() {
    let boxed = BoxedSubscription::new(());
    assert!(boxed.is_closed());
    boxed.unsubscribe();
  }

  #[rxflow_macro::test]
  fn mixed_handles_share_one_slot_type() {
    let (mock, closed) = MockSubscription::new();
    let task = crate::scheduler::TaskHandle::new();
    let slots = [mock.into_boxed(), task.clone().into_boxed()];

    assert!(slots.iter().all(|s| !s.is_closed()));
    for slot in slots {
      slot.unsubscribe();
    }
    assert!(closed.get());
    assert!(task.is_closed());
  }
}
