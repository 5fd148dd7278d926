//! Signal: a push-driven stream of events
//!
//! A [`Signal`] fans every published [`Event`] out to its observers, each on
//! the [`ExecutionContext`] it subscribed with. It is alive until the first
//! `Completed` or `Error` event, and after that it never delivers anything
//! again.
//!
//! ```rust
//! use rxsignal::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let Channel { input, output } = Signal::<i32>::channel();
//! let seen = Arc::new(Mutex::new(vec![]));
//! let c_seen = seen.clone();
//! let _sub = output.subscribe(move |e| c_seen.lock().unwrap().push(e));
//!
//! input.send_value(10);
//! input.send_completed();
//! input.send_value(15); // dropped: the signal has completed
//!
//! assert_eq!(*seen.lock().unwrap(), vec![Event::value(10), Event::completed()]);
//! assert!(output.is_completed());
//! ```

mod observers;

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc, Mutex, PoisonError, Weak,
  },
};

pub(crate) use observers::Detach;
use observers::{Entry, Observers};

use crate::{
  context::{Direct, ExecutionContext},
  error::Failure,
  event::Event,
  observer::{CompletedObserver, ErrorObserver, Observer, ValueObserver},
  sink::{Channel, Sink},
  subscription::SignalSubscription,
};

/// Lifecycle state of a signal.
///
/// A signal starts `Alive` and moves exactly once to `Completed` or `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SignalState {
  Alive = 0,
  Completed = 1,
  Failed = 2,
}

impl SignalState {
  fn from_u8(raw: u8) -> Self {
    match raw {
      0 => SignalState::Alive,
      1 => SignalState::Completed,
      _ => SignalState::Failed,
    }
  }
}

type Generator<V, E> = Box<dyn FnOnce(Sink<V, E>) + Send>;

struct Core<V, E> {
  state: AtomicU8,
  started: AtomicBool,
  generator: Mutex<Option<Generator<V, E>>>,
  observers: Arc<Observers<V, E>>,
}

/// Signal is a push-driven stream that sends events over time.
///
/// `Signal` is a cheap handle: clones share the same state and observers.
/// New signals come from [`Signal::channel`], which pairs the signal with the
/// [`Sink`] that feeds it, or from [`Signal::generate`], which defers
/// production until the first observer attaches.
pub struct Signal<V, E = Failure> {
  core: Arc<Core<V, E>>,
}

impl<V, E> Clone for Signal<V, E> {
  fn clone(&self) -> Self { Self { core: self.core.clone() } }
}

impl<V, E> Signal<V, E> {
  fn with_generator(generator: Option<Generator<V, E>>) -> Self {
    let started = generator.is_none();
    Self {
      core: Arc::new(Core {
        state: AtomicU8::new(SignalState::Alive as u8),
        started: AtomicBool::new(started),
        generator: Mutex::new(generator),
        observers: Arc::new(Observers::default()),
      }),
    }
  }

  #[inline]
  pub fn state(&self) -> SignalState {
    SignalState::from_u8(self.core.state.load(Ordering::Acquire))
  }

  #[inline]
  pub fn is_alive(&self) -> bool { self.state() == SignalState::Alive }

  #[inline]
  pub fn is_completed(&self) -> bool { self.state() == SignalState::Completed }

  #[inline]
  pub fn is_failed(&self) -> bool { self.state() == SignalState::Failed }

  /// Whether production has begun. Always `true` for signals created by
  /// [`Signal::channel`]; for generated signals it turns `true` on the first
  /// subscription.
  #[inline]
  pub fn is_started(&self) -> bool { self.core.started.load(Ordering::Acquire) }

  /// Number of currently registered observers.
  pub fn observer_count(&self) -> usize { self.core.observers.len() }
}

impl<V, E> Signal<V, E>
where
  V: Clone + Send + 'static,
  E: Clone + Send + 'static,
{
  /// Creates a new signal together with the input that feeds it.
  pub fn channel() -> Channel<V, E> {
    let output = Self::with_generator(None);
    Channel::new(Sink::new(output.clone()), output)
  }

  /// Creates a lazy signal.
  ///
  /// `generator` runs exactly once, when the first observer subscribes, and
  /// receives the signal's own input. It runs after that observer has been
  /// registered, so anything it sends synchronously reaches the observer
  /// before `subscribe` returns.
  ///
  /// ```rust
  /// use rxsignal::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let signal = Signal::<i32>::generate(|sink| sink.send_value(10));
  /// assert!(!signal.is_started());
  ///
  /// let last = Arc::new(Mutex::new(None));
  /// let c_last = last.clone();
  /// let _sub = signal.subscribe_values(move |v| *c_last.lock().unwrap() = Some(v));
  /// assert!(signal.is_started());
  /// assert_eq!(*last.lock().unwrap(), Some(10));
  /// ```
  pub fn generate<G>(generator: G) -> Self
  where
    G: FnOnce(Sink<V, E>) + Send + 'static,
  {
    Self::with_generator(Some(Box::new(generator)))
  }

  /// Delivers `event` to every observer, then moves to the terminal state if
  /// the event is terminating. A no-op once the signal is no longer alive.
  pub(crate) fn publish(&self, event: Event<V, E>) {
    if !self.is_alive() {
      tracing::trace!(kind = %event.kind(), "publish after termination dropped");
      return;
    }

    let terminal = match event {
      Event::Value(_) => None,
      Event::Completed => Some(SignalState::Completed),
      Event::Error(_) => Some(SignalState::Failed),
    };

    self.core.observers.broadcast(event, || self.is_alive());

    if let Some(state) = terminal {
      if self
        .core
        .state
        .compare_exchange(
          SignalState::Alive as u8,
          state as u8,
          Ordering::AcqRel,
          Ordering::Acquire,
        )
        .is_ok()
      {
        let released = self.core.observers.clear();
        tracing::debug!(?state, released, "signal terminated");
      }
    }
  }

  // ==================== Subscribing ====================

  /// Registers `observer`, delivered on `context`.
  ///
  /// Subscribing to a terminated signal is allowed; the observer simply never
  /// receives anything, there is no replay.
  pub fn subscribe_observer<C, O>(&self, context: C, observer: O) -> SignalSubscription
  where
    C: ExecutionContext + 'static,
    O: Observer<V, E> + 'static,
  {
    let active = Arc::new(AtomicBool::new(true));
    let entry = Entry::new(Box::new(context), Box::new(observer), active.clone());
    let id = self.core.observers.add(entry);
    let registry: Weak<Observers<V, E>> = Arc::downgrade(&self.core.observers);
    let subscription = SignalSubscription::new(id, active, registry);
    tracing::trace!(id, "observer subscribed");

    if self.is_alive() {
      self.start();
    } else {
      // the terminal transition may already have released the registry
      self.core.observers.remove(id);
    }
    subscription
  }

  /// Subscribes to every event, delivered on `context`.
  pub fn subscribe_with<C, F>(&self, context: C, f: F) -> SignalSubscription
  where
    C: ExecutionContext + 'static,
    F: Fn(Event<V, E>) + Send + Sync + 'static,
  {
    self.subscribe_observer(context, f)
  }

  /// Subscribes to every event, delivered synchronously on the publishing
  /// thread.
  pub fn subscribe<F>(&self, f: F) -> SignalSubscription
  where
    F: Fn(Event<V, E>) + Send + Sync + 'static,
  {
    self.subscribe_observer(Direct, f)
  }

  /// Subscribes to values only.
  pub fn subscribe_values_with<C, F>(&self, context: C, f: F) -> SignalSubscription
  where
    C: ExecutionContext + 'static,
    F: Fn(V) + Send + Sync + 'static,
  {
    self.subscribe_observer(context, ValueObserver(f))
  }

  pub fn subscribe_values<F>(&self, f: F) -> SignalSubscription
  where
    F: Fn(V) + Send + Sync + 'static,
  {
    self.subscribe_values_with(Direct, f)
  }

  /// Subscribes to the completion of the signal.
  pub fn subscribe_completed_with<C, F>(&self, context: C, f: F) -> SignalSubscription
  where
    C: ExecutionContext + 'static,
    F: Fn() + Send + Sync + 'static,
  {
    self.subscribe_observer(context, CompletedObserver(f))
  }

  pub fn subscribe_completed<F>(&self, f: F) -> SignalSubscription
  where
    F: Fn() + Send + Sync + 'static,
  {
    self.subscribe_completed_with(Direct, f)
  }

  /// Subscribes to the failure of the signal.
  pub fn subscribe_errors_with<C, F>(&self, context: C, f: F) -> SignalSubscription
  where
    C: ExecutionContext + 'static,
    F: Fn(E) + Send + Sync + 'static,
  {
    self.subscribe_observer(context, ErrorObserver(f))
  }

  pub fn subscribe_errors<F>(&self, f: F) -> SignalSubscription
  where
    F: Fn(E) + Send + Sync + 'static,
  {
    self.subscribe_errors_with(Direct, f)
  }

  /// Runs the generator of a lazy signal, at most once.
  fn start(&self) {
    if self.core.started.load(Ordering::Acquire) {
      return;
    }
    if self
      .core
      .started
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      return;
    }
    let generator = self
      .core
      .generator
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .take();
    if let Some(generator) = generator {
      tracing::debug!("starting lazy signal");
      generator(Sink::new(self.clone()));
    }
  }
}

impl<V, E> Debug for Signal<V, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Signal")
      .field("state", &self.state())
      .field("started", &self.is_started())
      .field("observers", &self.observer_count())
      .finish()
  }
}
