use std::{convert::Infallible, time::Duration};

use crate::{
  error::LookupError,
  observable::{self, BoxOp, ObservableExt},
  scheduler::Scheduler,
};

/// Resolves one query into a stream of results.
///
/// The search pipeline subscribes a fresh lookup for every settled query and
/// unsubscribes it as soon as a newer query arrives.
pub trait Lookup {
  fn lookup(&self, query: String) -> BoxOp<String, LookupError>;
}

impl<F> Lookup for F
where
  F: Fn(String) -> BoxOp<String, LookupError>,
{
  #[inline]
  fn lookup(&self, query: String) -> BoxOp<String, LookupError> { self(query) }
}

/// A stand-in for a remote search: waits `latency` on its scheduler, then
/// echoes the query once and completes. It never fails.
#[derive(Clone, Debug)]
pub struct SimulatedNetwork<SD> {
  latency: Duration,
  scheduler: SD,
}

impl<SD> SimulatedNetwork<SD> {
  pub fn new(latency: Duration, scheduler: SD) -> Self { Self { latency, scheduler } }

  pub fn latency(&self) -> Duration { self.latency }
}

impl<SD> Lookup for SimulatedNetwork<SD>
where
  SD: Scheduler + 'static,
{
  fn lookup(&self, query: String) -> BoxOp<String, LookupError> {
    observable::of(query)
      .delay(self.latency, self.scheduler.clone())
      .map_err(|never: Infallible| -> LookupError { match never {} })
      .box_it()
  }
}
