//! Hot, multicast observables.
//!
//! A subject is both an [`Observer`](crate::observer::Observer) and an
//! observable: whatever is pushed into it is forwarded to every current
//! subscriber. Clones share the same subscriber list.

mod state_subject;
mod subject_core;
mod subject_subscription;

pub use state_subject::StateSubject;
pub use subject_core::Subject;
pub use subject_subscription::SubjectSubscription;
