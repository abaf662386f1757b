//! Shared mutable cells used by operators to share state between the
//! observer half and the subscription half of a pipeline stage.
//!
//! Every pipeline in this crate lives on one logical thread (the UI context),
//! so the only cell type is the `Rc<RefCell<_>>` based [`MutRc`].

use std::{
  cell::{Ref, RefCell, RefMut},
  rc::Rc,
};

use crate::{observer::Observer, subscription::Subscription};

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  /// Returns true if both handles point at the same cell.
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }

  /// Mutable access, or `None` while the cell is borrowed further up the
  /// stack.
  pub fn try_rc_deref_mut(&self) -> Option<RefMut<'_, T>> { self.0.try_borrow_mut().ok() }
}

impl<T> RcDeref for MutRc<T> {
  type Target<'a>
    = Ref<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.0.borrow() }
}

impl<T> RcDerefMut for MutRc<T> {
  type Target<'a>
    = RefMut<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.0.borrow_mut() }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

/// A shared, optional observer. Terminal events take the inner observer out
/// of the cell before forwarding, so the borrow is released while downstream
/// code runs.
impl<O, Item, Err> Observer<Item, Err> for MutRc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self.rc_deref_mut().as_mut() {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.error(err);
    }
  }

  fn complete(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.complete();
    }
  }

  fn is_finished(&self) -> bool { self.rc_deref().as_ref().is_none_or(O::is_finished) }
}

/// A subscription slot. Unsubscribing empties it, later unsubscribes are
/// no-ops.
impl<U: Subscription> Subscription for MutRc<Option<U>> {
  fn unsubscribe(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.rc_deref().as_ref().is_none_or(U::is_closed) }
}
