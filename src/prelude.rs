//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

#[cfg(feature = "futures-scheduler")]
pub use crate::context::{ThreadPoolContext, ThreadPoolContextBuilder};
#[cfg(feature = "tokio-scheduler")]
pub use crate::context::TokioContext;
pub use crate::{
  context::{Direct, ExecutionContext, QueueContext, Work},
  error::{ContextError, EventError, Failure},
  event::{Event, EventKind},
  observer::{CompletedObserver, ErrorObserver, Observer, ValueObserver},
  signal::{Signal, SignalState},
  sink::{Channel, Emitter, Pipe, Sink},
  subscription::{Disposable, FnDisposable, SignalSubscription, SubscriptionGuard},
};
