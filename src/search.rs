//! The debounced search screen.
//!
//! Keystrokes land in a [`StateSubject`] holding the query. The pipeline
//! behind it waits for the query to settle, clears the display for an empty
//! query, skips a query equal to the previous one, and runs one lookup at a
//! time. A newer query cancels the lookup in flight. A failed lookup shows an
//! empty result.

use std::time::Duration;

use crate::{
  error::LookupError,
  lifecycle::LifecycleScope,
  observable::{self, ObservableExt},
  rc::{MutRc, RcDerefMut},
  scheduler::Scheduler,
  subject::StateSubject,
};

mod display;
mod network;

pub use display::{TextDisplay, TextView};
pub use network::{Lookup, SimulatedNetwork};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
  /// Quiet period a query must survive before it is looked up.
  pub debounce: Duration,
  /// Latency of [`SimulatedNetwork`].
  pub lookup_latency: Duration,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self { debounce: Duration::from_millis(500), lookup_latency: Duration::from_millis(2000) }
  }
}

impl SearchConfig {
  pub fn with_debounce(mut self, debounce: Duration) -> Self {
    self.debounce = debounce;
    self
  }

  pub fn with_lookup_latency(mut self, latency: Duration) -> Self {
    self.lookup_latency = latency;
    self
  }

  /// The simulated lookup this config describes, running on `scheduler`.
  pub fn simulated_network<SD>(&self, scheduler: SD) -> SimulatedNetwork<SD> {
    SimulatedNetwork::new(self.lookup_latency, scheduler)
  }
}

/// One open search screen.
///
/// The pipeline runs from [`start`](SearchScreen::start) until
/// [`destroy`](SearchScreen::destroy) or drop. Tearing the screen down
/// cancels the pending debounce and any lookup in flight. Nothing is written
/// to the display afterwards.
pub struct SearchScreen {
  query: StateSubject<String>,
  scope: LifecycleScope,
}

impl SearchScreen {
  /// Builds the pipeline and subscribes it. Every task it schedules runs on
  /// `scheduler`.
  pub fn start<D, L, SD>(config: &SearchConfig, display: D, lookup: L, scheduler: SD) -> Self
  where
    D: TextDisplay + 'static,
    L: Lookup + 'static,
    SD: Scheduler + 'static,
  {
    let query = StateSubject::new(String::new());
    let scope = LifecycleScope::new();
    let display = MutRc::own(display);
    let clear = display.clone();

    let subscription = query
      .clone()
      .debounce(config.debounce, scheduler)
      .tap(|q: &String| tracing::debug!(query = %q, "query settled"))
      .filter(move |q: &String| {
        if q.is_empty() {
          clear.rc_deref_mut().set_text("");
          false
        } else {
          true
        }
      })
      .distinct_until_changed()
      .flat_map_latest(move |q: String| {
        tracing::debug!(query = %q, "lookup started");
        lookup.lookup(q).catch_error(|err: LookupError| {
          tracing::warn!(error = %err, "lookup failed, showing an empty result");
          observable::of(String::new())
        })
      })
      .subscribe(move |result: String| display.rc_deref_mut().set_text(&result));
    scope.add(subscription);

    Self { query, scope }
  }

  /// Text-change callback of the search input. Every change is recorded.
  pub fn on_query_text_change(&self, text: &str) { self.query.set(text.to_owned()); }

  /// Submit callback of the search input. A submit without a query is
  /// ignored.
  pub fn on_query_text_submit(&self, query: Option<&str>) {
    if let Some(query) = query {
      self.query.set(query.to_owned());
    }
  }

  /// The latest query the input reported.
  pub fn query(&self) -> String { self.query.value() }

  /// Tears the pipeline down. Later calls do nothing.
  pub fn destroy(&self) { self.scope.cancel(); }

  pub fn is_destroyed(&self) -> bool { self.scope.is_cancelled() }
}

impl Drop for SearchScreen {
  fn drop(&mut self) { self.scope.cancel(); }
}
