use tokio::runtime::Handle;

use super::{ExecutionContext, Work};
use crate::error::ContextError;

/// Runs observer callbacks as tasks on a tokio runtime.
///
/// Tasks may run in any order, so this context gives no per-observer ordering
/// guarantee.
#[derive(Clone, Debug)]
pub struct TokioContext {
  handle: Handle,
}

impl TokioContext {
  /// Binds to the runtime the caller is running in.
  pub fn current() -> Result<Self, ContextError> {
    let handle = Handle::try_current().map_err(|_| {
      let err = ContextError::NoRuntime;
      tracing::debug!(reason = err.as_label(), "no tokio runtime on this thread");
      err
    })?;
    Ok(Self { handle })
  }

  pub fn from_handle(handle: Handle) -> Self { Self { handle } }
}

impl ExecutionContext for TokioContext {
  fn invoke(&self, work: Work) {
    // the JoinHandle is dropped: dispatch is fire-and-forget
    let _ = self.handle.spawn(async move { work() });
  }
}
