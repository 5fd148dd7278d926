//! # rxsignal: push-driven event signals
//!
//! A minimal reactive building block: one producer pushes [`Event`]s into a
//! [`Signal`], any number of observers receive them, and the signal ends with
//! exactly one terminal event (completion or failure) after which nothing is
//! delivered anymore.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxsignal::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let Channel { input, output } = Signal::<String>::channel();
//! let total = Arc::new(Mutex::new(0));
//! let c_total = total.clone();
//!
//! let _sub = output
//!   .map(|s| s.len())
//!   .subscribe_values(move |n| *c_total.lock().unwrap() += n);
//!
//! input.send_value("hello".to_owned());
//! input.send_value("rx".to_owned());
//! input.send_completed();
//!
//! assert_eq!(*total.lock().unwrap(), 7);
//! assert!(output.is_completed());
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] | `Value`, `Completed` or `Error` |
//! | [`Signal`] | The observable stream, with its observer registry and state |
//! | [`Sink`] | The input of a signal |
//! | [`ExecutionContext`] | Where an observer callback runs |
//! | [`SignalSubscription`] | Handle to dispose one observer |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): [`ThreadPoolContext`] on a futures
//!   thread pool
//! - **`tokio-scheduler`**: [`TokioContext`] on a tokio runtime
//!
//! [`Event`]: event::Event
//! [`Signal`]: signal::Signal
//! [`Sink`]: sink::Sink
//! [`ExecutionContext`]: context::ExecutionContext
//! [`SignalSubscription`]: subscription::SignalSubscription
//! [`ThreadPoolContext`]: context::ThreadPoolContext
//! [`TokioContext`]: context::TokioContext

pub mod context;
pub mod error;
pub mod event;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod signal;
pub mod sink;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
