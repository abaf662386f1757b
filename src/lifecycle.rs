use crate::subscription::{LocalSubscription, Subscription};

/// Cancellation token owned by one screen.
///
/// Every subscription a screen starts is added to its scope. Cancelling the
/// scope unsubscribes all of them, and anything added afterwards is
/// unsubscribed on the spot. Cancellation is irreversible.
#[derive(Clone, Debug, Default)]
pub struct LifecycleScope {
  children: LocalSubscription,
}

impl LifecycleScope {
  pub fn new() -> Self { Self::default() }

  /// Ties `subscription` to this scope.
  pub fn add<S: Subscription + 'static>(&self, subscription: S) {
    self.children.add(subscription);
  }

  pub fn cancel(&self) {
    if !self.is_cancelled() {
      tracing::debug!(children = self.children.teardown_size(), "lifecycle scope cancelled");
    }
    self.children.clone().unsubscribe();
  }

  pub fn is_cancelled(&self) -> bool { self.children.is_closed() }

  /// Subscriptions still owned by the scope.
  pub fn active_children(&self) -> usize { self.children.teardown_size() }
}

impl Subscription for LifecycleScope {
  fn unsubscribe(self) { self.cancel() }

  fn is_closed(&self) -> bool { self.is_cancelled() }
}
