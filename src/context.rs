//! Execution contexts
//!
//! An [`ExecutionContext`] decides where an observer callback runs. A signal
//! hands every delivery to the context of the observer it is addressed to and
//! never waits for it: dispatch is fire-and-forget from the signal's point of
//! view.
//!
//! | Context | Runs work | Keeps per-observer order |
//! |---------|-----------|--------------------------|
//! | [`Direct`] | inline, on the publishing thread | yes |
//! | [`QueueContext`] | when the owner drains the queue | yes |
//! | [`ThreadPoolContext`] | on a futures thread pool | only with one worker |
//! | [`TokioContext`] | as a task on a tokio runtime | no |
//!
//! Any `Fn(Work) + Send + Sync` closure is a context as well.
//!
//! # Panics in callbacks
//!
//! Contexts do not catch panics. Under [`Direct`] a panicking callback unwinds
//! through `publish` into the producer and the remaining observers of that
//! round are skipped. The signal itself stays usable.

mod queue;
#[cfg(feature = "futures-scheduler")]
mod thread_pool;
#[cfg(feature = "tokio-scheduler")]
mod tokio_rt;

pub use queue::QueueContext;
#[cfg(feature = "futures-scheduler")]
pub use thread_pool::{ThreadPoolContext, ThreadPoolContextBuilder};
#[cfg(feature = "tokio-scheduler")]
pub use tokio_rt::TokioContext;

/// A unit of work handed to an execution context.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// Capability to run a unit of work somewhere.
///
/// Implementations must not assume they are called from any particular
/// thread. If they defer execution, they are responsible for keeping the order
/// in which work was submitted when callers rely on it.
pub trait ExecutionContext: Send + Sync {
  fn invoke(&self, work: Work);
}

impl<F> ExecutionContext for F
where
  F: Fn(Work) + Send + Sync,
{
  #[inline]
  fn invoke(&self, work: Work) { self(work) }
}

/// Runs work synchronously on the calling thread.
///
/// This is the context used by every `subscribe*` method that does not take
/// one explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Direct;

impl ExecutionContext for Direct {
  #[inline]
  fn invoke(&self, work: Work) { work() }
}
