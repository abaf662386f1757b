//! # rxflow: reactive screens on a small Rx core
//!
//! A single-threaded observable library (`Observable`, `Observer`,
//! `Subscription`, `Scheduler`) and two screens built on it:
//!
//! - a counter that emits `0..=10` on a worker scheduler, one value every
//!   500 ms, observed on the main scheduler ([`screen::MainScreen`]);
//! - a debounced search box whose query flows through `debounce`, an
//!   empty-query filter, `distinct_until_changed` and `flat_map_latest`
//!   into a text display ([`search::SearchScreen`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use rxflow::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A cold producer, subscribed with an observer |
//! | [`ObservableExt`] | Operators and `subscribe*` helpers |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | An execution context that runs tasks, optionally delayed |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** + **`timer`** (default): `futures`'
//!   `LocalSpawner` is a scheduler, with `futures-time` sleeps.
//! - **`tokio-scheduler`**: `TokioScheduler`, for use inside a tokio
//!   `LocalSet`.
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod basics;
pub mod counter;
pub mod error;
pub mod lifecycle;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod screen;
pub mod search;
pub mod subject;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;

// Run the README's code blocks as doctests.
#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
