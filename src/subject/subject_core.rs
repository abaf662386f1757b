use std::{cell::Cell, collections::VecDeque, mem, rc::Rc};

use super::subject_subscription::SubjectSubscription;
use crate::{
  observable::{Observable, ObservableExt},
  observer::{BoxedObserver, Observer},
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A multicast subject.
///
/// Observers may subscribe or unsubscribe while the subject is emitting.
/// Observers added during an emission start with the next value. After a
/// terminal event, new subscribers get that terminal event at once.
///
/// A value sent from inside an observer's `next` is queued and delivered to
/// every observer once the current value has reached all of them.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxflow::prelude::*;
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let mut subject = Subject::<i32, Infallible>::default();
/// let s = seen.clone();
/// subject.clone().subscribe(move |v| s.borrow_mut().push(v));
///
/// subject.next(1);
/// subject.next(2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct Subject<Item, Err> {
  state: MutRc<SubjectState<Item, Err>>,
}

pub struct SubjectState<Item, Err> {
  observers: Vec<Entry<Item, Err>>,
  terminal: Option<Terminal<Err>>,
  emitting: bool,
  pending: VecDeque<Item>,
}

struct Entry<Item, Err> {
  closed: Rc<Cell<bool>>,
  observer: BoxedObserver<Item, Err>,
}

impl<Item, Err> Entry<Item, Err> {
  fn is_live(&self) -> bool { !self.closed.get() && !self.observer.is_finished() }
}

#[derive(Clone)]
enum Terminal<Err> {
  Completed,
  Errored(Err),
}

impl<Item, Err> SubjectState<Item, Err> {
  /// Detaches every closed or finished entry and hands them back, so the
  /// caller can drop them after releasing the borrow.
  pub(crate) fn remove_closed(&mut self) -> Vec<BoxedObserver<Item, Err>> {
    let (live, dead): (Vec<_>, Vec<_>) = mem::take(&mut self.observers)
      .into_iter()
      .partition(Entry::is_live);
    self.observers = live;
    dead.into_iter().map(|e| e.observer).collect()
  }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self {
    let state = SubjectState {
      observers: vec![],
      terminal: None,
      emitting: false,
      pending: VecDeque::new(),
    };
    Subject { state: MutRc::own(state) }
  }
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject { state: self.state.clone() } }
}

impl<Item, Err> Subject<Item, Err> {
  /// Number of observers currently subscribed.
  pub fn observer_count(&self) -> usize {
    self
      .state
      .rc_deref()
      .observers
      .iter()
      .filter(|e| e.is_live())
      .count()
  }

  /// `true` once the subject has completed or failed.
  pub fn is_stopped(&self) -> bool { self.state.rc_deref().terminal.is_some() }

  pub(crate) fn broadcast(&self, value: Item)
  where
    Item: Clone,
    Err: Clone,
  {
    let mut observers = {
      let mut st = self.state.rc_deref_mut();
      if st.terminal.is_some() {
        return;
      }
      if st.emitting {
        st.pending.push_back(value);
        return;
      }
      st.emitting = true;
      mem::take(&mut st.observers)
    };

    let mut value = value;
    loop {
      for entry in observers.iter_mut() {
        if entry.is_live() {
          entry.observer.next(value.clone());
        }
      }

      let (queued, dead) = {
        let mut st = self.state.rc_deref_mut();
        let added = mem::replace(&mut st.observers, mem::take(&mut observers));
        st.observers.extend(added);
        let dead = st.remove_closed();
        let queued = if st.terminal.is_none() { st.pending.pop_front() } else { None };
        if queued.is_some() {
          observers = mem::take(&mut st.observers);
        } else {
          st.emitting = false;
          st.pending.clear();
        }
        (queued, dead)
      };
      drop(dead);

      match queued {
        Some(next) => value = next,
        None => break,
      }
    }

    // An observer terminated the subject while we were emitting.
    let terminal = self.state.rc_deref().terminal.clone();
    if let Some(terminal) = terminal {
      self.finish(terminal);
    }
  }

  fn terminate(&self, terminal: Terminal<Err>)
  where
    Err: Clone,
  {
    {
      let mut st = self.state.rc_deref_mut();
      if st.terminal.is_some() {
        return;
      }
      st.terminal = Some(terminal.clone());
    }
    self.finish(terminal);
  }

  fn finish(&self, terminal: Terminal<Err>)
  where
    Err: Clone,
  {
    let observers = mem::take(&mut self.state.rc_deref_mut().observers);
    for entry in observers {
      if !entry.is_live() {
        continue;
      }
      entry.closed.set(true);
      match &terminal {
        Terminal::Completed => entry.observer.complete(),
        Terminal::Errored(err) => entry.observer.error(err.clone()),
      }
    }
  }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  #[inline]
  fn next(&mut self, value: Item) { self.broadcast(value) }

  fn error(self, err: Err) { self.terminate(Terminal::Errored(err)) }

  fn complete(self) { self.terminate(Terminal::Completed) }

  fn is_finished(&self) -> bool { self.is_stopped() }
}

impl<Item, Err, O> Observable<Item, Err, O> for Subject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Err: Clone,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let terminal = self.state.rc_deref().terminal.clone();
    match terminal {
      Some(Terminal::Completed) => {
        observer.complete();
        SubjectSubscription::closed()
      }
      Some(Terminal::Errored(err)) => {
        observer.error(err);
        SubjectSubscription::closed()
      }
      None => {
        let closed = Rc::new(Cell::new(false));
        self
          .state
          .rc_deref_mut()
          .observers
          .push(Entry { closed: closed.clone(), observer: Box::new(observer) });
        SubjectSubscription { closed, state: Some(self.state) }
      }
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Subject<Item, Err> {}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxflow_macro::test]
  fn multicasts_to_every_subscriber() {
    let a = Rc::new(RefCell::new(vec![]));
    let b = Rc::new(RefCell::new(vec![]));
    let mut subject = Subject::<i32, Infallible>::default();

    let a_c = a.clone();
    subject.clone().subscribe(move |v| a_c.borrow_mut().push(v));
    subject.next(1);
    let b_c = b.clone();
    subject.clone().subscribe(move |v| b_c.borrow_mut().push(v));
    subject.next(2);

    assert_eq!(*a.borrow(), vec![1, 2]);
    assert_eq!(*b.borrow(), vec![2]);
    assert_eq!(subject.observer_count(), 2);
  }

  #[rxflow_macro::test]
  fn unsubscribe_removes_observer() {
    let hits = Rc::new(RefCell::new(0));
    let mut subject = Subject::<(), Infallible>::default();

    let h = hits.clone();
    let sub = subject.clone().subscribe(move |_| *h.borrow_mut() += 1);
    subject.next(());
    sub.unsubscribe();
    subject.next(());

    assert_eq!(*hits.borrow(), 1);
    assert_eq!(subject.observer_count(), 0);
  }

  #[rxflow_macro::test]
  fn late_subscriber_gets_terminal_event() {
    let subject = Subject::<i32, &'static str>::default();
    subject.clone().error("closed");

    let errors = Rc::new(RefCell::new(vec![]));
    let e = errors.clone();
    let sub = subject
      .clone()
      .subscribe_all(|_| {}, move |err| e.borrow_mut().push(err), || {});

    assert_eq!(*errors.borrow(), vec!["closed"]);
    assert!(sub.is_closed());
    assert!(subject.is_stopped());
  }

  #[rxflow_macro::test]
  fn subscribe_while_emitting_starts_with_next_value() {
    let late = Rc::new(RefCell::new(vec![]));
    let mut subject = Subject::<i32, Infallible>::default();

    let (inner_subject, late_c) = (subject.clone(), late.clone());
    let subscribed = Rc::new(RefCell::new(false));
    subject.clone().subscribe(move |_| {
      if !subscribed.replace(true) {
        let l = late_c.clone();
        inner_subject
          .clone()
          .subscribe(move |v| l.borrow_mut().push(v));
      }
    });

    subject.next(1);
    subject.next(2);
    assert_eq!(*late.borrow(), vec![2]);
  }

  #[rxflow_macro::test]
  fn value_sent_while_emitting_reaches_every_observer() {
    let first = Rc::new(RefCell::new(vec![]));
    let second = Rc::new(RefCell::new(vec![]));
    let mut subject = Subject::<i32, Infallible>::default();

    let (mut inner, f) = (subject.clone(), first.clone());
    subject.clone().subscribe(move |v| {
      f.borrow_mut().push(v);
      if v < 3 {
        inner.next(v + 1);
        // Still queued behind the current value.
        assert_eq!(f.borrow().last(), Some(&v));
      }
    });
    let s = second.clone();
    subject.clone().subscribe(move |v| s.borrow_mut().push(v));

    subject.next(1);
    assert_eq!(*first.borrow(), vec![1, 2, 3]);
    assert_eq!(*second.borrow(), vec![1, 2, 3]);

    subject.next(4);
    assert_eq!(*second.borrow(), vec![1, 2, 3, 4]);
  }

  #[rxflow_macro::test]
  fn complete_while_emitting_drops_queued_values() {
    let seen = Rc::new(RefCell::new(vec![]));
    let done = Rc::new(RefCell::new(0));
    let mut subject = Subject::<i32, Infallible>::default();

    let (mut inner, s) = (subject.clone(), seen.clone());
    subject.clone().subscribe(move |v| {
      s.borrow_mut().push(v);
      if v == 1 {
        inner.next(2);
        inner.clone().complete();
      }
    });
    let d = done.clone();
    subject
      .clone()
      .subscribe_all(|_| {}, |e: Infallible| match e {}, move || *d.borrow_mut() += 1);

    subject.next(1);
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(*done.borrow(), 1);
    assert!(subject.is_stopped());
  }

  #[rxflow_macro::test]
  fn unsubscribe_during_emission() {
    let hits = Rc::new(RefCell::new(vec![]));
    let mut subject = Subject::<i32, Infallible>::default();
    let slot: Rc<RefCell<Option<SubjectSubscription<i32, Infallible>>>> = Rc::default();

    let (h, s) = (hits.clone(), slot.clone());
    let sub = subject.clone().subscribe(move |v| {
      h.borrow_mut().push(v);
      if let Some(sub) = s.borrow_mut().take() {
        sub.unsubscribe();
      }
    });
    *slot.borrow_mut() = Some(sub);

    subject.next(1);
    subject.next(2);
    assert_eq!(*hits.borrow(), vec![1]);
    assert_eq!(subject.observer_count(), 0);
  }

  #[rxflow_macro::test]
  fn complete_reaches_all_and_stops() {
    let done = Rc::new(RefCell::new(0));
    let mut subject = Subject::<i32, Infallible>::default();
    for _ in 0..2 {
      let d = done.clone();
      subject
        .clone()
        .subscribe_all(|_| {}, |e: Infallible| match e {}, move || *d.borrow_mut() += 1);
    }

    subject.clone().complete();
    subject.next(1);
    assert_eq!(*done.borrow(), 2);
    assert_eq!(subject.observer_count(), 0);
  }
}
