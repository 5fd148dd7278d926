//! Event: one notification carried by a signal
//!
//! An event is exactly one of a value, a completion marker or a failure
//! marker. Completion and failure are terminating: once a signal publishes
//! one of them it never delivers anything again.

use std::fmt::{self, Display, Formatter};

use crate::error::{EventError, Failure};

/// The tag of an [`Event`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
  Value,
  Completed,
  Error,
}

impl Display for EventKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let name = match self {
      EventKind::Value => "value",
      EventKind::Completed => "completed",
      EventKind::Error => "error",
    };
    f.write_str(name)
  }
}

/// A signal event.
///
/// Two events are equal when they carry the same tag and equal payloads. Error
/// payloads are compared by value, so the default [`Failure`] type compares
/// messages.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event<V, E = Failure> {
  Value(V),
  Completed,
  Error(E),
}

impl<V, E> Event<V, E> {
  #[inline]
  pub fn value(value: V) -> Self { Event::Value(value) }

  #[inline]
  pub fn completed() -> Self { Event::Completed }

  #[inline]
  pub fn error(err: E) -> Self { Event::Error(err) }

  /// Builds a value event, rejecting an absent payload.
  pub fn try_value(value: Option<V>) -> Result<Self, EventError> {
    value
      .map(Event::Value)
      .ok_or(EventError::MissingPayload { kind: EventKind::Value })
  }

  /// Builds an error event, rejecting an absent payload.
  pub fn try_error(err: Option<E>) -> Result<Self, EventError> {
    err
      .map(Event::Error)
      .ok_or(EventError::MissingPayload { kind: EventKind::Error })
  }

  pub fn kind(&self) -> EventKind {
    match self {
      Event::Value(_) => EventKind::Value,
      Event::Completed => EventKind::Completed,
      Event::Error(_) => EventKind::Error,
    }
  }

  #[inline]
  pub fn is_value(&self) -> bool { matches!(self, Event::Value(_)) }

  #[inline]
  pub fn is_completed(&self) -> bool { matches!(self, Event::Completed) }

  #[inline]
  pub fn is_error(&self) -> bool { matches!(self, Event::Error(_)) }

  /// `true` for `Completed` and `Error`.
  #[inline]
  pub fn is_terminating(&self) -> bool { !self.is_value() }

  /// The payload of a value event, `None` for any other tag.
  pub fn value_ref(&self) -> Option<&V> {
    match self {
      Event::Value(v) => Some(v),
      _ => None,
    }
  }

  /// The payload of an error event, `None` for any other tag.
  pub fn error_ref(&self) -> Option<&E> {
    match self {
      Event::Error(e) => Some(e),
      _ => None,
    }
  }

  pub fn into_value(self) -> Option<V> {
    match self {
      Event::Value(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_error(self) -> Option<E> {
    match self {
      Event::Error(e) => Some(e),
      _ => None,
    }
  }

  /// Transforms the payload of a value event.
  ///
  /// `f` is only called for `Value`; `Completed` stays `Completed` and the
  /// payload of `Error` is passed through untouched.
  pub fn map<U, F>(self, f: F) -> Event<U, E>
  where
    F: FnOnce(V) -> U,
  {
    match self {
      Event::Value(v) => Event::Value(f(v)),
      Event::Completed => Event::Completed,
      Event::Error(e) => Event::Error(e),
    }
  }

  /// Borrows the payload, turning `&Event<V, E>` into `Event<&V, &E>`.
  pub fn as_ref(&self) -> Event<&V, &E> {
    match self {
      Event::Value(v) => Event::Value(v),
      Event::Completed => Event::Completed,
      Event::Error(e) => Event::Error(e),
    }
  }
}

impl<V, E> From<Result<V, E>> for Event<V, E> {
  fn from(result: Result<V, E>) -> Self {
    match result {
      Ok(v) => Event::Value(v),
      Err(e) => Event::Error(e),
    }
  }
}

impl<V: Display, E: Display> Display for Event<V, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Event::Value(v) => write!(f, "{v}"),
      Event::Completed => f.write_str("Completed"),
      Event::Error(e) => write!(f, "Error: {e}"),
    }
  }
}
