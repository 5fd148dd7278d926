use std::{
  collections::VecDeque,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{ExecutionContext, Work};

/// A context that parks work in a FIFO queue until its owner drains it.
///
/// Useful to run observer callbacks on a thread of your choosing (a UI or
/// event loop thread) and as a deterministic scheduler in tests. Clones share
/// the same queue.
///
/// ```rust
/// use rxsignal::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let queue = QueueContext::new();
/// let Channel { input, output } = Signal::<i32>::channel();
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// let _sub = output.subscribe_values_with(queue.clone(), move |v| c_seen.lock().unwrap().push(v));
///
/// input.send_value(1);
/// input.send_value(2);
/// assert!(seen.lock().unwrap().is_empty());
///
/// assert_eq!(queue.run_pending(), 2);
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
#[derive(Clone, Default)]
pub struct QueueContext {
  tasks: Arc<Mutex<VecDeque<Work>>>,
}

impl QueueContext {
  pub fn new() -> Self { Self::default() }

  /// Runs the oldest queued unit of work. Returns `false` if the queue was
  /// empty.
  pub fn run_one(&self) -> bool {
    // pop under the lock, run outside of it: work may enqueue more work
    let task = self.lock().pop_front();
    match task {
      Some(task) => {
        task();
        true
      }
      None => false,
    }
  }

  /// Runs queued work until the queue is empty, including work queued while
  /// draining. Returns how many units ran.
  pub fn run_pending(&self) -> usize {
    let mut ran = 0;
    while self.run_one() {
      ran += 1;
    }
    ran
  }

  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  fn lock(&self) -> MutexGuard<'_, VecDeque<Work>> {
    self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ExecutionContext for QueueContext {
  fn invoke(&self, work: Work) { self.lock().push_back(work); }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  #[test]
  fn runs_in_submission_order() {
    let queue = QueueContext::new();
    let order = Arc::new(Mutex::new(vec![]));
    for i in 0..5 {
      let order = order.clone();
      queue.invoke(Box::new(move || order.lock().unwrap().push(i)));
    }
    assert_eq!(queue.len(), 5);
    assert!(order.lock().unwrap().is_empty());

    assert_eq!(queue.run_pending(), 5);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    assert!(queue.is_empty());
  }

  #[test]
  fn work_queued_while_draining_runs() {
    let queue = QueueContext::new();
    let hits = Arc::new(Mutex::new(0));
    let (c_queue, c_hits) = (queue.clone(), hits.clone());
    queue.invoke(Box::new(move || {
      *c_hits.lock().unwrap() += 1;
      let hits = c_hits.clone();
      c_queue.invoke(Box::new(move || *hits.lock().unwrap() += 1));
    }));

    assert_eq!(queue.run_pending(), 2);
    assert_eq!(*hits.lock().unwrap(), 2);
  }

  #[test]
  fn run_one_on_empty_queue() {
    assert!(!QueueContext::new().run_one());
  }
}
