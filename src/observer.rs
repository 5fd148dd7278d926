//! Observer trait and implementations
//!
//! An Observer is the consumer side of a signal: it receives every event the
//! signal publishes while it is subscribed. Any `Fn(Event<V, E>)` closure is
//! an observer; the adapters below narrow a closure to one event tag.

use crate::event::Event;

// ============================================================================
// Observer Trait
// ============================================================================

/// Provides a mechanism for receiving push-based notifications.
///
/// Observers may be invoked from any thread and, when several producers
/// publish concurrently, from several threads at once, hence `&self` and the
/// `Send + Sync` bound.
pub trait Observer<V, E>: Send + Sync {
  fn on(&self, event: Event<V, E>);
}

impl<V, E, F> Observer<V, E> for F
where
  F: Fn(Event<V, E>) + Send + Sync,
{
  #[inline]
  fn on(&self, event: Event<V, E>) { self(event) }
}

// ============================================================================
// Filtering adapters
// ============================================================================

/// Calls the closure with the payload of `Value` events, skips the rest.
#[derive(Clone)]
pub struct ValueObserver<F>(pub F);

impl<V, E, F> Observer<V, E> for ValueObserver<F>
where
  F: Fn(V) + Send + Sync,
{
  #[inline]
  fn on(&self, event: Event<V, E>) {
    if let Event::Value(v) = event {
      (self.0)(v);
    }
  }
}

/// Calls the closure when the `Completed` event arrives.
#[derive(Clone)]
pub struct CompletedObserver<F>(pub F);

impl<V, E, F> Observer<V, E> for CompletedObserver<F>
where
  F: Fn() + Send + Sync,
{
  #[inline]
  fn on(&self, event: Event<V, E>) {
    if event.is_completed() {
      (self.0)();
    }
  }
}

/// Calls the closure with the cause of the `Error` event.
#[derive(Clone)]
pub struct ErrorObserver<F>(pub F);

impl<V, E, F> Observer<V, E> for ErrorObserver<F>
where
  F: Fn(E) + Send + Sync,
{
  #[inline]
  fn on(&self, event: Event<V, E>) {
    if let Event::Error(e) = event {
      (self.0)(e);
    }
  }
}
