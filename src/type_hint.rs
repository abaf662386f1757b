use std::marker::PhantomData;

/// Zero-sized marker that pins a type parameter an operator struct would
/// otherwise leave unconstrained (usually the upstream item or error type).
pub struct TypeHint<T>(PhantomData<fn() -> T>);

impl<T> TypeHint<T> {
  #[inline]
  pub fn new() -> Self { Self::default() }
}

impl<T> Default for TypeHint<T> {
  fn default() -> Self { TypeHint(PhantomData) }
}

impl<T> Clone for TypeHint<T> {
  #[inline]
  fn clone(&self) -> Self { *self }
}

impl<T> Copy for TypeHint<T> {}
