//! Operators deriving new signals from existing ones.
//!
//! Each operator lives in its own module as an inherent method on
//! [`Signal`](crate::signal::Signal). An operator builds a fresh channel and
//! forwards the transformed events of an internal subscription into it.

pub mod map;
