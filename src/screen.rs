//! The main screen: runs the counter and opens the search screen.

use crate::{
  counter::{self, CounterConfig},
  lifecycle::LifecycleScope,
  observable::ObservableExt,
  scheduler::Scheduler,
  search::{Lookup, SearchConfig, SearchScreen, TextDisplay},
};

/// Settings for every screen of the app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
  pub counter: CounterConfig,
  pub search: SearchConfig,
}

impl AppConfig {
  pub fn with_counter(mut self, counter: CounterConfig) -> Self {
    self.counter = counter;
    self
  }

  pub fn with_search(mut self, search: SearchConfig) -> Self {
    self.search = search;
    self
  }
}

/// The app's entry screen.
///
/// `main` is the UI context every observer runs on. `worker` produces the
/// counter values.
pub struct MainScreen<M, W> {
  config: AppConfig,
  main: M,
  worker: W,
  scope: LifecycleScope,
}

impl<M, W> MainScreen<M, W>
where
  M: Scheduler + 'static,
  W: Scheduler + 'static,
{
  pub fn new(config: AppConfig, main: M, worker: W) -> Self {
    Self { config, main, worker, scope: LifecycleScope::new() }
  }

  pub fn config(&self) -> &AppConfig { &self.config }

  /// Starts the counter on the worker and delivers its values to `f` on the
  /// main context. The subscription lives until the screen is destroyed.
  pub fn observe_counter<F>(&self, mut f: F)
  where
    F: FnMut(u32) + 'static,
  {
    let subscription = counter::emitter(&self.config.counter, self.worker.clone())
      .observe_on(self.main.clone())
      .subscribe(move |value: u32| {
        tracing::debug!(value, "counter value received");
        f(value)
      });
    self.scope.add(subscription);
  }

  /// Opens the search screen on the main context. It has its own lifecycle
  /// and outlives this screen.
  pub fn open_search<D, L>(&self, display: D, lookup: L) -> SearchScreen
  where
    D: TextDisplay + 'static,
    L: Lookup + 'static,
  {
    tracing::debug!("opening search screen");
    SearchScreen::start(&self.config.search, display, lookup, self.main.clone())
  }

  pub fn destroy(&self) { self.scope.cancel(); }

  pub fn is_destroyed(&self) -> bool { self.scope.is_cancelled() }
}

impl<M, W> Drop for MainScreen<M, W> {
  fn drop(&mut self) { self.scope.cancel(); }
}
