//! Small walkthroughs of the operator set: mapping a range with a completion
//! hook, failing part-way through, and recovering from the failure.

use std::{convert::Infallible, ops::RangeInclusive};

use crate::{
  error::BasicsError,
  observable::{self, BoxOp, ObservableExt},
  observer::Emitter,
};

/// Squares every value of `range`. Completion is logged.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxflow::prelude::*;
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
/// rxflow::basics::squares(1..=5).subscribe(move |v| s.borrow_mut().push(v));
/// assert_eq!(*seen.borrow(), vec![1, 4, 9, 16, 25]);
/// ```
pub fn squares(range: RangeInclusive<i32>) -> BoxOp<i32, Infallible> {
  observable::from_iter(range)
    .map(|v: i32| v * v)
    .on_complete(|| tracing::debug!("completed"))
    .box_it()
}

/// Squares every value of `range` until it meets `rejected`, then fails with
/// [`BasicsError::Rejected`].
pub fn checked_squares(range: RangeInclusive<i32>, rejected: i32) -> BoxOp<i32, BasicsError> {
  observable::create(move |emitter: &mut dyn Emitter<i32, BasicsError>| {
    for v in range {
      if v == rejected {
        emitter.error(BasicsError::Rejected(v));
        return;
      }
      emitter.next(v * v);
    }
    emitter.complete();
  })
  .on_complete(|| tracing::debug!("completed"))
  .finalize(|| tracing::debug!("squares terminated"))
  .box_it()
}

/// [`checked_squares`] with the failure caught: the error is logged and the
/// stream completes instead.
pub fn caught_squares(range: RangeInclusive<i32>, rejected: i32) -> BoxOp<i32, Infallible> {
  checked_squares(range, rejected)
    .catch_error(|err: BasicsError| {
      tracing::warn!(error = %err, "caught error");
      observable::empty()
    })
    .box_it()
}
