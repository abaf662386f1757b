use std::{cell::Cell, rc::Rc};

use super::subject_core::SubjectState;
use crate::{rc::MutRc, subscription::Subscription};

/// Subscription handle for a [`Subject`](super::Subject).
///
/// Unsubscribing marks the entry closed, so the subject skips it from then
/// on. The entry itself is removed right away when the subject is idle, or
/// after the emission in progress otherwise.
pub struct SubjectSubscription<Item, Err> {
  pub(crate) closed: Rc<Cell<bool>>,
  pub(crate) state: Option<MutRc<SubjectState<Item, Err>>>,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  /// A handle for an observer the subject never kept.
  pub(crate) fn closed() -> Self { Self { closed: Rc::new(Cell::new(true)), state: None } }
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(self) {
    if self.closed.replace(true) {
      return;
    }
    let Some(state) = self.state else { return };
    let removed = state
      .try_rc_deref_mut()
      .map(|mut st| st.remove_closed());
    // Dropped observers may run teardown that touches this subject.
    drop(removed);
  }

  #[inline]
  fn is_closed(&self) -> bool { self.closed.get() }
}
