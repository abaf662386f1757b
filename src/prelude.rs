//! Everything needed to build and subscribe a pipeline.
//!
//! Source constructors stay behind their module path: `observable::of`,
//! `observable::interval` and so on.

pub use std::convert::Infallible;

pub use crate::{
  observable::{self, BoxOp, Observable, ObservableExt},
  observer::{BoxedObserver, Emitter, Observer},
  scheduler::{Duration, Scheduler, TaskHandle},
  subject::{StateSubject, Subject, SubjectSubscription},
  subscription::{
    BoxedSubscription, ClosureSubscription, IntoBoxedSubscription, LocalSubscription, Subscription,
    SubscriptionGuard, TupleSubscription,
  },
};
