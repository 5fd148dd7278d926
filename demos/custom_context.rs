//! Example: Custom Execution Context
//!
//! This example plugs a user-defined execution context into a signal. The
//! context owns one worker thread and runs every delivered callback on it,
//! in submission order, while the producer keeps publishing from `main`.

use std::{
  sync::{mpsc, Arc, Mutex},
  thread::{self, JoinHandle},
};

use rxsignal::prelude::*;

// ==================================================================================
// 1. Define the Custom Context
// ==================================================================================

/// Runs work on a single dedicated thread.
pub struct WorkerContext {
  name: &'static str,
  tx: Mutex<Option<mpsc::Sender<Work>>>,
  worker: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerContext {
  pub fn spawn(name: &'static str) -> Self {
    let (tx, rx) = mpsc::channel::<Work>();
    let worker = thread::Builder::new()
      .name(name.to_owned())
      .spawn(move || {
        for work in rx {
          work();
        }
      })
      .expect("failed to spawn worker thread");
    Self { name, tx: Mutex::new(Some(tx)), worker: Mutex::new(Some(worker)) }
  }

  /// Stops accepting work and waits until everything queued has run.
  pub fn shutdown(&self) {
    self.tx.lock().unwrap().take();
    if let Some(worker) = self.worker.lock().unwrap().take() {
      worker.join().expect("worker thread panicked");
    }
  }
}

// 2. Implement ExecutionContext
// Every observer subscribed with this context hands its callbacks to `invoke`.
impl ExecutionContext for WorkerContext {
  fn invoke(&self, work: Work) {
    match self.tx.lock().unwrap().as_ref() {
      Some(tx) => {
        println!("[{}] queued work", self.name);
        let _ = tx.send(work);
      }
      None => println!("[{}] shut down, work dropped", self.name),
    }
  }
}

// ==================================================================================
// 3. Usage
// ==================================================================================

fn main() {
  println!("--- Custom Context Example ---");

  let worker = Arc::new(WorkerContext::spawn("rxsignal-worker"));
  let Channel { input, output } = Signal::<String>::channel();

  // `Arc<WorkerContext>` is not itself a context, so wrap it in a closure.
  let ctx = {
    let worker = worker.clone();
    move |work: Work| worker.invoke(work)
  };

  let _lengths = output
    .map(|s| s.len())
    .subscribe_with(ctx, |event| {
      let thread = thread::current();
      println!("[{}] received {}", thread.name().unwrap_or("?"), event);
    });

  let _direct = output.subscribe_values(|s| println!("[main] direct observer saw {s:?}"));

  {
    // joins the worker once the producer is done
    let c_worker = worker.clone();
    let _shutdown = FnDisposable::new(move || c_worker.shutdown()).dispose_when_dropped();

    for word in ["12", "7", "forty-two", "3"] {
      match word.parse::<u32>() {
        Ok(_) => input.send_value(word.to_owned()),
        Err(err) => input.send_error(Failure::from_error(&err)),
      }
    }
    input.send_value("ignored".to_owned());
  }

  println!("state after the stream ended: {:?}", output.state());
}
