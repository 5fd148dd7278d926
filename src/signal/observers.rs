use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc, Mutex, MutexGuard, PoisonError,
};

use smallvec::SmallVec;

use crate::{context::ExecutionContext, event::Event, observer::Observer};

/// Removal side of the registry, erased over the event types so a
/// subscription handle does not need to carry them.
pub(crate) trait Detach: Send + Sync {
  fn detach(&self, id: u64);
}

/// One registered observer together with the context it is delivered on.
pub(crate) struct Entry<V, E> {
  context: Box<dyn ExecutionContext>,
  observer: Box<dyn Observer<V, E>>,
  active: Arc<AtomicBool>,
}

impl<V, E> Entry<V, E> {
  pub(crate) fn new(
    context: Box<dyn ExecutionContext>, observer: Box<dyn Observer<V, E>>,
    active: Arc<AtomicBool>,
  ) -> Self {
    Self { context, observer, active }
  }

  #[inline]
  fn is_active(&self) -> bool { self.active.load(Ordering::Acquire) }
}

struct Slots<V, E> {
  next_id: u64,
  items: SmallVec<[(u64, Arc<Entry<V, E>>); 2]>,
}

/// Observer registry of a signal, keyed by a monotonically increasing id.
///
/// # Design
///
/// - **Short critical sections**: the lock is held only to insert, remove or
///   copy out a snapshot of the entries. Delivery walks the snapshot with the
///   lock released, so callbacks may subscribe or dispose re-entrantly and a
///   slow observer never blocks registration.
/// - **Active flag**: disposing clears the entry's flag before removing it,
///   and the flag is checked right before each callback runs. A delivery
///   round already in flight therefore skips a disposed observer unless its
///   callback had already started.
/// - **SmallVec**: no heap allocation for the common case of 0-2 observers.
pub(crate) struct Observers<V, E> {
  slots: Mutex<Slots<V, E>>,
}

impl<V, E> Default for Observers<V, E> {
  fn default() -> Self { Self { slots: Mutex::new(Slots { next_id: 0, items: SmallVec::new() }) } }
}

impl<V, E> Observers<V, E> {
  /// Add an entry and return its unique ID.
  pub(crate) fn add(&self, entry: Entry<V, E>) -> u64 {
    let mut slots = self.lock();
    let id = slots.next_id;
    slots.next_id += 1;
    slots.items.push((id, Arc::new(entry)));
    id
  }

  pub(crate) fn remove(&self, id: u64) -> bool {
    let mut slots = self.lock();
    match slots.items.iter().position(|(i, _)| *i == id) {
      Some(pos) => {
        slots.items.remove(pos);
        true
      }
      None => false,
    }
  }

  /// Drops every entry. Used once the signal has terminated.
  pub(crate) fn clear(&self) -> usize {
    let mut slots = self.lock();
    let count = slots.items.len();
    slots.items.clear();
    count
  }

  pub(crate) fn len(&self) -> usize { self.lock().items.len() }

  fn snapshot(&self) -> SmallVec<[Arc<Entry<V, E>>; 4]> {
    self.lock().items.iter().map(|(_, entry)| entry.clone()).collect()
  }

  // The lock never guards user code, a poisoned lock still holds a
  // consistent list.
  fn lock(&self) -> MutexGuard<'_, Slots<V, E>> {
    self.slots.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<V, E> Observers<V, E>
where
  V: Clone + Send + 'static,
  E: Clone + Send + 'static,
{
  /// Hands `event` to every registered observer through its context.
  ///
  /// `is_live` is checked before each dispatch: a callback may terminate the
  /// signal re-entrantly, and the remaining observers must not see `event`
  /// after the terminal one.
  ///
  /// The event is cloned for all observers except the last one, which
  /// receives the moved value.
  pub(crate) fn broadcast(&self, event: Event<V, E>, is_live: impl Fn() -> bool) {
    let mut iter = self
      .snapshot()
      .into_iter()
      .filter(|entry| entry.is_active())
      .peekable();
    while let Some(entry) = iter.next() {
      if !is_live() {
        break;
      }
      if iter.peek().is_some() {
        entry.dispatch(event.clone());
      } else {
        entry.dispatch(event);
        break;
      }
    }
  }
}

impl<V, E> Entry<V, E>
where
  V: Send + 'static,
  E: Send + 'static,
{
  fn dispatch(self: Arc<Self>, event: Event<V, E>) {
    let target = self.clone();
    self.context.invoke(Box::new(move || {
      if target.is_active() {
        target.observer.on(event);
      }
    }));
  }
}

impl<V, E> Detach for Observers<V, E>
where
  V: 'static,
  E: 'static,
{
  fn detach(&self, id: u64) { self.remove(id); }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    context::{Direct, QueueContext},
    error::Failure,
  };

  fn entry<F>(f: F) -> Entry<i32, Failure>
  where
    F: Fn(Event<i32>) + Send + Sync + 'static,
  {
    Entry::new(Box::new(Direct), Box::new(f), Arc::new(AtomicBool::new(true)))
  }

  #[test]
  fn ids_are_unique_and_removable() {
    let observers = Observers::<i32, Failure>::default();
    let a = observers.add(entry(|_| {}));
    let b = observers.add(entry(|_| {}));
    assert_ne!(a, b);
    assert_eq!(observers.len(), 2);

    assert!(observers.remove(a));
    assert!(!observers.remove(a));
    assert_eq!(observers.len(), 1);
    assert_eq!(observers.clear(), 1);
    assert_eq!(observers.len(), 0);
  }

  #[test]
  fn broadcast_reaches_every_active_entry() {
    let observers = Observers::<i32, Failure>::default();
    let seen = Arc::new(Mutex::new(vec![]));
    for tag in 0..3 {
      let seen = seen.clone();
      observers.add(entry(move |e| seen.lock().unwrap().push((tag, e))));
    }

    observers.broadcast(Event::value(5), || true);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|(_, e)| *e == Event::value(5)));
  }

  #[test]
  fn inactive_entry_is_skipped_even_if_queued() {
    let observers = Observers::<i32, Failure>::default();
    let queue = QueueContext::new();
    let hits = Arc::new(Mutex::new(0));
    let c_hits = hits.clone();
    let active = Arc::new(AtomicBool::new(true));
    observers.add(Entry::new(
      Box::new(queue.clone()),
      Box::new(move |_: Event<i32>| *c_hits.lock().unwrap() += 1),
      active.clone(),
    ));

    observers.broadcast(Event::value(1), || true);
    active.store(false, Ordering::Release);
    queue.run_pending();
    assert_eq!(*hits.lock().unwrap(), 0);
  }

  #[test]
  fn callback_may_touch_registry() {
    let observers = Arc::new(Observers::<i32, Failure>::default());
    let c_observers = observers.clone();
    let first = entry(move |_| {
      c_observers.add(entry(|_| {}));
    });
    observers.add(first);
    observers.broadcast(Event::value(1), || true);
    assert_eq!(observers.len(), 2);
  }

  #[test]
  fn broadcast_stops_once_no_longer_live() {
    let observers = Observers::<i32, Failure>::default();
    let seen = Arc::new(Mutex::new(vec![]));
    let live = Arc::new(AtomicBool::new(true));
    for tag in 0..3 {
      let (seen, live) = (seen.clone(), live.clone());
      observers.add(entry(move |_| {
        seen.lock().unwrap().push(tag);
        if tag == 0 {
          live.store(false, Ordering::Release);
        }
      }));
    }

    observers.broadcast(Event::value(1), || live.load(Ordering::Acquire));
    assert_eq!(*seen.lock().unwrap(), vec![0]);
  }
}
