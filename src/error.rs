//! Errors that travel through streams as `Observer::error` payloads.

use thiserror::Error;

/// Failure of a single search lookup.
///
/// The search pipeline never shows these. The inner lookup stream catches
/// them and substitutes an empty result. A superseded or torn-down lookup is
/// unsubscribed, not failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
  #[error("lookup for '{query}' is unavailable")]
  Unavailable { query: String },
}

/// Failure raised by the checked operator walkthroughs in [`crate::basics`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasicsError {
  #[error("value == {0}")]
  Rejected(i32),
}
