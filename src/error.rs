//! Error types
//!
//! - [`Failure`]: the default error payload carried by `Event::Error`.
//! - [`EventError`]: raised when an event is built from an absent payload.
//! - [`ContextError`]: raised when an execution context cannot be created.

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

use crate::event::EventKind;

/// Default failure payload of a signal.
///
/// Failures are cheap to clone and compare by message, so two `Error` events
/// carrying failures with the same text are equal.
///
/// ```rust
/// use rxsignal::prelude::*;
///
/// let a = Failure::new("connection reset");
/// let b = Failure::new("connection reset");
/// assert_eq!(Event::<i32>::error(a), Event::error(b));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
#[error("{message}")]
pub struct Failure {
  message: Arc<str>,
}

impl Failure {
  pub fn new(message: impl Into<Arc<str>>) -> Self { Self { message: message.into() } }

  /// Captures the display text of any error.
  pub fn from_error(err: &(dyn StdError + 'static)) -> Self { Self::new(err.to_string()) }

  #[inline]
  pub fn message(&self) -> &str { &self.message }
}

impl From<&str> for Failure {
  fn from(message: &str) -> Self { Self::new(message) }
}

impl From<String> for Failure {
  fn from(message: String) -> Self { Self::new(message) }
}

/// Errors raised while constructing an [`Event`](crate::event::Event).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
  /// A `Value` or `Error` event was requested without a payload.
  #[error("a {kind} event requires a payload")]
  MissingPayload { kind: EventKind },
}

/// Errors raised while creating an execution context.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ContextError {
  /// The worker threads of a pool could not be spawned.
  #[error("failed to spawn worker pool: {0}")]
  Spawn(#[from] std::io::Error),

  /// A runtime-bound context was requested outside of that runtime.
  #[error("no async runtime is running on this thread")]
  NoRuntime,
}

impl ContextError {
  /// Returns a short stable label for logs.
  pub fn as_label(&self) -> &'static str {
    match self {
      ContextError::Spawn(_) => "context_spawn_failed",
      ContextError::NoRuntime => "context_no_runtime",
    }
  }
}
