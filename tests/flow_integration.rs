//! End-to-end scenarios for the counter and search screens, driven by the
//! virtual-time scheduler unless noted otherwise.

use std::{cell::RefCell, rc::Rc};

use rxflow::{
  counter::{self, CounterConfig},
  error::LookupError,
  prelude::*,
  scheduler::TestScheduler,
  screen::{AppConfig, MainScreen},
  search::{Lookup, SearchConfig, SearchScreen, TextView},
};
use tracing_test::traced_test;

fn ms(v: u64) -> Duration { Duration::from_millis(v) }

type Calls = Rc<RefCell<Vec<String>>>;

/// The default simulated network, recording every query it is asked for.
fn recording_network(calls: Calls) -> impl Lookup {
  let network = SearchConfig::default().simulated_network(TestScheduler);
  move |query: String| -> BoxOp<String, LookupError> {
    calls.borrow_mut().push(query.clone());
    network.lookup(query)
  }
}

fn open_search() -> (SearchScreen, TextView, Calls) {
  TestScheduler::init();
  let view = TextView::new();
  let calls = Calls::default();
  let screen = SearchScreen::start(
    &SearchConfig::default(),
    view.clone(),
    recording_network(calls.clone()),
    TestScheduler,
  );
  (screen, view, calls)
}

#[rxflow_macro::test]
fn rapid_queries_only_look_up_the_last_one() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("a");
  TestScheduler::advance_by(ms(100));
  screen.on_query_text_change("ab");
  TestScheduler::advance_by(ms(100));
  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(5000));

  assert_eq!(*calls.borrow(), vec!["abc"]);
  assert_eq!(view.history(), vec!["abc"]);
}

#[rxflow_macro::test]
fn repeated_query_is_looked_up_once() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(600));
  // Typed and erased again inside one debounce window.
  screen.on_query_text_change("abcd");
  TestScheduler::advance_by(ms(100));
  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(5000));

  assert_eq!(*calls.borrow(), vec!["abc"]);
  assert_eq!(view.text(), "abc");
}

#[rxflow_macro::test]
fn empty_query_clears_display_without_lookup() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(2500));
  assert_eq!(view.text(), "abc");

  screen.on_query_text_change("");
  TestScheduler::advance_by(ms(499));
  assert_eq!(view.text(), "abc");
  TestScheduler::advance_by(ms(1));
  assert_eq!(view.text(), "");

  TestScheduler::advance_by(ms(5000));
  assert_eq!(*calls.borrow(), vec!["abc"]);
  assert_eq!(view.history(), vec!["abc", ""]);
}

#[rxflow_macro::test]
fn newer_keystroke_inside_window_wins() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(100));
  screen.on_query_text_change("abcd");

  // "abcd" settles 500ms after it was typed, then takes 2000ms to answer.
  TestScheduler::advance_by(ms(2499));
  assert!(view.history().is_empty());
  TestScheduler::advance_by(ms(1));

  assert_eq!(*calls.borrow(), vec!["abcd"]);
  assert_eq!(view.history(), vec!["abcd"]);
}

#[rxflow_macro::test]
fn query_during_lookup_replaces_it() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(1000));
  screen.on_query_text_change("xyz");

  TestScheduler::advance_by(ms(1500));
  // "abc" would have answered by now.
  assert!(view.history().is_empty());

  TestScheduler::advance_by(ms(1000));
  assert_eq!(*calls.borrow(), vec!["abc", "xyz"]);
  assert_eq!(view.history(), vec!["xyz"]);
}

#[rxflow_macro::test]
fn cleared_then_retyped_query_stays_suppressed() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(2500));
  screen.on_query_text_change("");
  TestScheduler::advance_by(ms(500));
  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(5000));

  // The empty query never passes the filter, so "abc" still equals the last
  // looked-up query and is dropped.
  assert_eq!(*calls.borrow(), vec!["abc"]);
  assert_eq!(view.text(), "");
}

#[rxflow_macro::test]
fn clear_during_lookup_keeps_the_stale_result() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(600));
  screen.on_query_text_change("");
  TestScheduler::advance_by(ms(500));
  assert_eq!(view.history(), vec![""]);

  // The empty query stops at the filter, so the running lookup is not
  // replaced and its answer lands on the cleared display.
  TestScheduler::advance_by(ms(5000));
  assert_eq!(*calls.borrow(), vec!["abc"]);
  assert_eq!(view.text(), "abc");
  assert_eq!(view.history(), vec!["", "abc"]);
}

#[rxflow_macro::test]
fn destroy_cancels_in_flight_lookup() {
  let (screen, view, calls) = open_search();

  screen.on_query_text_change("abc");
  TestScheduler::advance_by(ms(1000));
  assert_eq!(*calls.borrow(), vec!["abc"]);

  screen.destroy();
  assert!(TestScheduler::is_empty());

  screen.on_query_text_change("later");
  TestScheduler::advance_by(ms(10_000));
  assert!(view.history().is_empty());
  assert_eq!(*calls.borrow(), vec!["abc"]);
}

#[rxflow_macro::test]
fn dropping_the_screen_tears_it_down() {
  let (screen, view, _calls) = open_search();

  screen.on_query_text_change("abc");
  drop(screen);

  TestScheduler::advance_by(ms(10_000));
  assert!(view.history().is_empty());
  assert!(TestScheduler::is_empty());
}

#[rxflow_macro::test]
#[traced_test]
fn failing_lookup_settles_to_empty_string() {
  TestScheduler::init();
  let view = TextView::new();
  let network = SearchConfig::default().simulated_network(TestScheduler);
  let flaky = move |query: String| -> BoxOp<String, LookupError> {
    if query == "offline" {
      network
        .lookup(query.clone())
        .switch_map(move |_: String| {
          observable::throw_err::<String, _>(LookupError::Unavailable { query: query.clone() })
        })
        .box_it()
    } else {
      network.lookup(query)
    }
  };
  let screen = SearchScreen::start(&SearchConfig::default(), view.clone(), flaky, TestScheduler);

  screen.on_query_text_change("online");
  TestScheduler::advance_by(ms(2500));
  assert_eq!(view.text(), "online");

  screen.on_query_text_change("offline");
  TestScheduler::advance_by(ms(2500));
  assert_eq!(view.text(), "");
  assert!(logs_contain("lookup failed"));
  assert!(logs_contain("lookup for 'offline' is unavailable"));

  // The pipeline keeps running after the failure.
  screen.on_query_text_change("online again");
  TestScheduler::advance_by(ms(2500));
  assert_eq!(view.history(), vec!["online", "", "online again"]);
}

#[rxflow_macro::test]
fn counter_drains_zero_through_ten_then_completes() {
  TestScheduler::init();
  let seen = Rc::new(RefCell::new(vec![]));
  let completed = Rc::new(RefCell::new(false));
  let (s, c) = (seen.clone(), completed.clone());

  counter::emitter(&CounterConfig::default(), TestScheduler)
    .observe_on(TestScheduler)
    .subscribe_all(
      move |v| s.borrow_mut().push(v),
      |e: Infallible| match e {},
      move || *c.borrow_mut() = true,
    );

  TestScheduler::advance_by(ms(5499));
  assert_eq!(seen.borrow().len(), 10);
  assert!(!*completed.borrow());

  TestScheduler::advance_by(ms(1));
  assert_eq!(*seen.borrow(), (0..=10).collect::<Vec<u32>>());
  assert!(*completed.borrow());
}

#[rxflow_macro::test]
fn main_screen_runs_counter_and_opens_search() {
  TestScheduler::init();
  let main = MainScreen::new(AppConfig::default(), TestScheduler, TestScheduler);
  let counted = Rc::new(RefCell::new(vec![]));
  let c = counted.clone();
  main.observe_counter(move |v| c.borrow_mut().push(v));

  let view = TextView::new();
  let search = main.open_search(view.clone(), main.config().search.simulated_network(TestScheduler));
  search.on_query_text_change("flow");

  TestScheduler::advance_by(ms(6000));
  assert_eq!(counted.borrow().len(), 11);
  assert_eq!(view.text(), "flow");

  main.destroy();
  search.destroy();
  assert!(TestScheduler::is_empty());
}

#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
#[rxflow_macro::test]
fn search_runs_on_a_local_pool() {
  use futures::executor::LocalPool;

  let mut pool = LocalPool::new();
  let spawner = pool.spawner();
  let config = SearchConfig::default()
    .with_debounce(ms(10))
    .with_lookup_latency(ms(20));
  let view = TextView::new();
  let screen = SearchScreen::start(
    &config,
    view.clone(),
    config.simulated_network(spawner.clone()),
    spawner,
  );

  screen.on_query_text_change("pool");
  pool.run();

  assert_eq!(view.text(), "pool");
}
