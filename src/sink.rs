//! Producer side of a signal
//!
//! A [`Sink`] is the input of exactly one [`Signal`]. A [`Channel`] can be
//! thought of as a physical pipe with two ends: at one end (`input`) you
//! insert events, at the other end (`output`) you observe what comes out.

use std::fmt::{Debug, Formatter};

use crate::{error::Failure, event::Event, signal::Signal};

/// A trait for sending events into a signal.
///
/// Only [`send`](Emitter::send) is required; the other methods wrap their
/// argument in the matching [`Event`].
pub trait Emitter<V, E> {
  fn send(&self, event: Event<V, E>);

  #[inline]
  fn send_value(&self, value: V) { self.send(Event::Value(value)) }

  #[inline]
  fn send_completed(&self) { self.send(Event::Completed) }

  #[inline]
  fn send_error(&self, err: E) { self.send(Event::Error(err)) }
}

/// The input handle of a signal.
///
/// Sending into a signal that has already completed or failed is silently
/// ignored. Clones feed the same signal.
pub struct Sink<V, E = Failure> {
  signal: Signal<V, E>,
}

impl<V, E> Sink<V, E> {
  pub(crate) fn new(signal: Signal<V, E>) -> Self { Self { signal } }
}

impl<V, E> Clone for Sink<V, E> {
  fn clone(&self) -> Self { Self { signal: self.signal.clone() } }
}

impl<V, E> Emitter<V, E> for Sink<V, E>
where
  V: Clone + Send + 'static,
  E: Clone + Send + 'static,
{
  #[inline]
  fn send(&self, event: Event<V, E>) { self.signal.publish(event) }
}

impl<V, E> Debug for Sink<V, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Sink")
      .field("state", &self.signal.state())
      .finish()
  }
}

// ============================================================================
// Channel / Pipe
// ============================================================================

/// Access to both ends of a pipe.
pub trait Pipe<V, E> {
  fn sink(&self) -> &Sink<V, E>;
  fn signal(&self) -> &Signal<V, E>;
}

/// A signal paired with the sink that feeds it, as returned by
/// [`Signal::channel`].
pub struct Channel<V, E = Failure> {
  pub input: Sink<V, E>,
  pub output: Signal<V, E>,
}

impl<V, E> Channel<V, E> {
  pub(crate) fn new(input: Sink<V, E>, output: Signal<V, E>) -> Self { Self { input, output } }

  pub fn into_parts(self) -> (Sink<V, E>, Signal<V, E>) { (self.input, self.output) }
}

impl<V, E> Pipe<V, E> for Channel<V, E> {
  #[inline]
  fn sink(&self) -> &Sink<V, E> { &self.input }

  #[inline]
  fn signal(&self) -> &Signal<V, E> { &self.output }
}

impl<V, E> Clone for Channel<V, E> {
  fn clone(&self) -> Self { Self { input: self.input.clone(), output: self.output.clone() } }
}

impl<V, E> Debug for Channel<V, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Channel")
      .field("output", &self.output)
      .finish()
  }
}
