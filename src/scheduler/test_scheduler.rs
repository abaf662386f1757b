//! A scheduler on a virtual clock.
//!
//! Time only moves when a test says so, which makes `delay`, `debounce`,
//! `interval` and whole screens deterministic.
//!
//! # Usage
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxflow::{prelude::*, scheduler::TestScheduler};
//!
//! TestScheduler::init();
//!
//! let received = Rc::new(RefCell::new(Vec::new()));
//! let received_c = received.clone();
//! observable::of(42)
//!   .delay(Duration::from_millis(100), TestScheduler)
//!   .subscribe(move |v| received_c.borrow_mut().push(v));
//!
//! assert!(received.borrow().is_empty());
//! TestScheduler::advance_by(Duration::from_millis(100));
//! assert_eq!(*received.borrow(), vec![42]);
//! ```
//!
//! The clock and queue are thread-local. The test harness runs each test on
//! its own thread, so tests never see each other's tasks.

use std::{cell::RefCell, cmp::Ordering, collections::BinaryHeap};

use super::{Duration, Scheduler, TaskHandle};

// ==================== Internal State ====================

#[derive(Default)]
struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
  initialized: bool,
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Box<dyn FnOnce()>,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Reversed: the max-heap yields the earliest task, ties by schedule order.
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

thread_local! {
  static TEST_SCHEDULER_STATE: RefCell<TestSchedulerState>
    = RefCell::new(TestSchedulerState::default());
}

// ==================== TestScheduler ====================

/// Virtual-time scheduler for tests.
///
/// Zero-sized. Every value on a thread drives the same clock and queue, so
/// handing `TestScheduler` to several operators keeps them in step.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestScheduler;

impl TestScheduler {
  /// Resets the clock to zero and drops every queued task. Every test starts
  /// with this call; the other methods panic until it has been made.
  pub fn init() {
    TEST_SCHEDULER_STATE.with(|cell| {
      *cell.borrow_mut() = TestSchedulerState { initialized: true, ..Default::default() };
    });
  }

  fn with_state<R>(f: impl FnOnce(&mut TestSchedulerState) -> R) -> R {
    TEST_SCHEDULER_STATE.with(|cell| {
      let mut state = cell.borrow_mut();
      assert!(state.initialized, "TestScheduler::init() must be called before using the scheduler");
      f(&mut state)
    })
  }

  /// Virtual time elapsed since `init`.
  pub fn now() -> Duration { Self::with_state(|state| state.virtual_time) }

  /// Queued tasks that are still going to run.
  pub fn pending_count() -> usize {
    Self::with_state(|state| {
      state
        .task_queue
        .iter()
        .filter(|queued| !queued.handle.is_closed())
        .count()
    })
  }

  pub fn is_empty() -> bool { Self::pending_count() == 0 }

  /// Pops the next task due at or before `limit`, moving the clock to its
  /// time. Cancelled tasks leave the clock alone.
  fn pop_due(limit: Option<Duration>) -> Option<ScheduledTask> {
    Self::with_state(|state| {
      let head = state.task_queue.peek()?;
      if limit.is_some_and(|limit| head.scheduled_time > limit) {
        return None;
      }
      let next = state.task_queue.pop()?;
      if !next.handle.is_closed() {
        state.virtual_time = next.scheduled_time;
      }
      Some(next)
    })
  }

  fn run_until(limit: Option<Duration>) {
    // The state borrow is released before a task runs: tasks schedule more.
    while let Some(ScheduledTask { task, handle, .. }) = Self::pop_due(limit) {
      if !handle.is_closed() {
        task();
        handle.mark_finished();
      }
    }
  }

  /// Moves the clock forward by `duration`, running every task that falls
  /// due on the way in time order (FIFO among equal times). Tasks scheduled
  /// by those tasks run too if they fall due in the window.
  pub fn advance_by(duration: Duration) {
    let target = Self::now() + duration;
    Self::run_until(Some(target));
    Self::with_state(|state| state.virtual_time = target);
  }

  /// Runs the queue dry, jumping the clock to each task in turn.
  ///
  /// Does not return while something keeps rescheduling itself, such as an
  /// `interval` without `take`.
  pub fn flush() {
    Self::with_state(|_| ());
    Self::run_until(None);
  }
}

impl Scheduler for TestScheduler {
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnOnce() + 'static,
  {
    Self::with_state(|state| {
      let handle = TaskHandle::new();
      let task_id = state.next_task_id;
      state.next_task_id += 1;
      state.task_queue.push(ScheduledTask {
        scheduled_time: state.virtual_time + delay.unwrap_or_default(),
        task_id,
        task: Box::new(task),
        handle: handle.clone(),
      });
      handle
    })
  }
}
