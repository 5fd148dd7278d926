use futures::executor::{ThreadPool, ThreadPoolBuilder};
use once_cell::sync::OnceCell;

use super::{ExecutionContext, Work};
use crate::error::ContextError;

static DEFAULT_POOL: OnceCell<ThreadPool> = OnceCell::new();

/// Runs observer callbacks on a `futures` thread pool.
///
/// With more than one worker, deliveries to the same observer may run
/// concurrently and out of order. Use [`ThreadPoolContext::serial`] (a single
/// worker) when an observer needs its events in publish order.
#[derive(Clone, Debug)]
pub struct ThreadPoolContext {
  pool: ThreadPool,
}

impl ThreadPoolContext {
  /// A new pool with one worker per CPU.
  pub fn new() -> Result<Self, ContextError> { Self::builder().build() }

  /// A new pool with exactly one worker, which keeps submission order.
  pub fn serial() -> Result<Self, ContextError> { Self::builder().pool_size(1).build() }

  /// The process-wide pool, created on first use and shared by every caller.
  pub fn shared() -> Result<Self, ContextError> {
    let pool = DEFAULT_POOL.get_or_try_init(ThreadPool::new)?;
    Ok(Self { pool: pool.clone() })
  }

  pub fn builder() -> ThreadPoolContextBuilder { ThreadPoolContextBuilder::default() }

  /// Wraps an existing pool.
  pub fn from_pool(pool: ThreadPool) -> Self { Self { pool } }
}

impl ExecutionContext for ThreadPoolContext {
  fn invoke(&self, work: Work) { self.pool.spawn_ok(async move { work() }); }
}

/// Configures a [`ThreadPoolContext`].
#[derive(Debug, Default, Clone)]
pub struct ThreadPoolContextBuilder {
  pool_size: Option<usize>,
  name_prefix: Option<String>,
}

impl ThreadPoolContextBuilder {
  /// Number of worker threads. Defaults to the number of CPUs.
  pub fn pool_size(mut self, size: usize) -> Self {
    self.pool_size = Some(size);
    self
  }

  /// Prefix for worker thread names; each worker gets its index appended.
  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = Some(prefix.into());
    self
  }

  pub fn build(self) -> Result<ThreadPoolContext, ContextError> {
    let mut builder = ThreadPoolBuilder::new();
    if let Some(size) = self.pool_size {
      builder.pool_size(size);
    }
    if let Some(prefix) = self.name_prefix {
      builder.name_prefix(prefix);
    }
    let pool = builder.create().map_err(|err| {
      let err = ContextError::from(err);
      tracing::warn!(reason = err.as_label(), %err, "thread pool context not created");
      err
    })?;
    tracing::debug!(pool_size = ?self.pool_size, "thread pool context created");
    Ok(ThreadPoolContext { pool })
  }
}

#[cfg(test)]
mod tests {
  use std::{sync::mpsc, thread, time::Duration};

  use super::*;

  const WAIT: Duration = Duration::from_secs(5);

  #[test]
  fn runs_off_the_calling_thread() {
    let ctx = ThreadPoolContext::builder()
      .pool_size(1)
      .name_prefix("rxsignal-test-")
      .build()
      .unwrap();
    let (tx, rx) = mpsc::channel();
    ctx.invoke(Box::new(move || {
      let name = thread::current().name().map(str::to_owned);
      tx.send(name).unwrap();
    }));

    let name = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(name.as_deref(), Some("rxsignal-test-0"));
  }

  #[test]
  fn serial_pool_keeps_order() {
    let ctx = ThreadPoolContext::serial().unwrap();
    let (tx, rx) = mpsc::channel();
    for i in 0..100 {
      let tx = tx.clone();
      ctx.invoke(Box::new(move || tx.send(i).unwrap()));
    }
    let received: Vec<_> = (0..100).map(|_| rx.recv_timeout(WAIT).unwrap()).collect();
    assert_eq!(received, (0..100).collect::<Vec<_>>());
  }

  #[test]
  fn shared_pool_is_reused() {
    let (tx, rx) = mpsc::channel();
    let first = ThreadPoolContext::shared().unwrap();
    let second = ThreadPoolContext::shared().unwrap();
    let c_tx = tx.clone();
    first.invoke(Box::new(move || c_tx.send(1).unwrap()));
    second.invoke(Box::new(move || tx.send(2).unwrap()));

    let mut got = vec![rx.recv_timeout(WAIT).unwrap(), rx.recv_timeout(WAIT).unwrap()];
    got.sort();
    assert_eq!(got, vec![1, 2]);
  }
}
