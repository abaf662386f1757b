//! Drives both screens on a `futures` local pool with scripted input.
//!
//! ```sh
//! RUST_LOG=rxflow=debug cargo run --example flow_demo
//! ```

use std::rc::Rc;

use futures::executor::LocalPool;
use rxflow::{
  basics,
  prelude::*,
  screen::{AppConfig, MainScreen},
  search::TextView,
};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rxflow=debug,flow_demo=info")),
    )
    .init();

  basics::squares(1..=5).subscribe(|v| tracing::info!(v, "square"));
  basics::caught_squares(1..=5, 3).subscribe(|v| tracing::info!(v, "checked square"));

  let mut pool = LocalPool::new();
  let spawner = pool.spawner();
  let config = AppConfig::default();

  let main = MainScreen::new(config, spawner.clone(), spawner.clone());
  main.observe_counter(|v| tracing::info!(v, "counter"));

  let view = TextView::new();
  let search = Rc::new(main.open_search(view.clone(), config.search.simulated_network(spawner.clone())));

  let script = [(0, "r"), (100, "ru"), (200, "rus"), (300, "rust"), (3500, ""), (4500, "flow")];
  for (at, text) in script {
    let search = search.clone();
    spawner.schedule(move || search.on_query_text_change(text), Some(Duration::from_millis(at)));
  }

  pool.run();
  tracing::info!(text = %view.text(), history = ?view.history(), "search display");

  search.destroy();
  main.destroy();
}
