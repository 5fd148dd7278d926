//! Disposables: handles that cancel a subscription
//!
//! Every `subscribe*` call on a [`Signal`](crate::signal::Signal) returns a
//! [`SignalSubscription`]. Disposing it removes that one observer; it never
//! changes the state of the signal or affects other observers.

use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError, Weak,
  },
};

use crate::signal::Detach;

/// Something that can be disposed, usually to free resources or cancel work.
///
/// Disposing is idempotent: every call after the first is a no-op.
pub trait Disposable {
  fn dispose(&self);

  fn is_disposed(&self) -> bool;

  /// Activates "RAII" behavior: the returned guard disposes when dropped.
  ///
  /// **Attention:** If you don't bind the guard to a variable, it is dropped
  /// and disposed immediately.
  fn dispose_when_dropped(self) -> SubscriptionGuard<Self>
  where
    Self: Sized,
  {
    SubscriptionGuard(self)
  }
}

impl<T: ?Sized + Disposable> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: ?Sized + Disposable> Disposable for Arc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

/// The handle of one observer registration on a signal.
///
/// It holds only a weak reference to the signal's registry, so keeping a
/// subscription around does not keep the signal alive.
#[must_use = "dropping a subscription does not dispose it; bind it or call `dispose_when_dropped`"]
pub struct SignalSubscription {
  id: u64,
  active: Arc<AtomicBool>,
  registry: Weak<dyn Detach>,
}

impl SignalSubscription {
  pub(crate) fn new(id: u64, active: Arc<AtomicBool>, registry: Weak<dyn Detach>) -> Self {
    Self { id, active, registry }
  }
}

impl Disposable for SignalSubscription {
  fn dispose(&self) {
    if self
      .active
      .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
      .is_ok()
    {
      if let Some(registry) = self.registry.upgrade() {
        registry.detach(self.id);
      }
      tracing::trace!(id = self.id, "subscription disposed");
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { !self.active.load(Ordering::Acquire) }
}

impl Debug for SignalSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SignalSubscription")
      .field("id", &self.id)
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// A disposable that runs a closure the first time it is disposed.
///
/// ```rust
/// use rxsignal::prelude::*;
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// let released = Arc::new(AtomicUsize::new(0));
/// let c_released = released.clone();
/// let d = FnDisposable::new(move || { c_released.fetch_add(1, Ordering::SeqCst); });
/// d.dispose();
/// d.dispose();
/// assert_eq!(released.load(Ordering::SeqCst), 1);
/// ```
pub struct FnDisposable<F>(Mutex<Option<F>>);

impl<F: FnOnce()> FnDisposable<F> {
  pub fn new(f: F) -> Self { Self(Mutex::new(Some(f))) }
}

impl<F: FnOnce()> Disposable for FnDisposable<F> {
  fn dispose(&self) {
    let f = self.0.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(f) = f {
      f();
    }
  }

  fn is_disposed(&self) -> bool {
    self.0.lock().unwrap_or_else(PoisonError::into_inner).is_none()
  }
}

/// An RAII implementation of a "scoped subscription". When this structure is
/// dropped (falls out of scope), the inner disposable is disposed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: Disposable>(T);

impl<T: Disposable> SubscriptionGuard<T> {
  /// Wraps an existing disposable with a guard to enable RAII behavior for
  /// it.
  pub fn new(disposable: T) -> SubscriptionGuard<T> { SubscriptionGuard(disposable) }

  pub fn get_ref(&self) -> &T { &self.0 }
}

impl<T: Disposable> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::AtomicUsize;

  use super::*;

  #[derive(Default)]
  struct Resource {
    released: AtomicUsize,
  }

  impl Disposable for Resource {
    fn dispose(&self) { self.released.fetch_add(1, Ordering::SeqCst); }

    fn is_disposed(&self) -> bool { self.released.load(Ordering::SeqCst) > 0 }
  }

  #[test]
  fn fn_disposable_runs_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let c_count = count.clone();
    let d = FnDisposable::new(move || {
      c_count.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!d.is_disposed());
    d.dispose();
    d.dispose();
    assert!(d.is_disposed());
    assert_eq!(count.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let resource = Arc::new(Resource::default());
    {
      let _guard = resource.clone().dispose_when_dropped();
      assert!(!resource.is_disposed());
    }
    assert!(resource.is_disposed());
  }

  #[test]
  fn boxed_disposables() {
    let a = Arc::new(Resource::default());
    let list: Vec<Box<dyn Disposable>> =
      vec![Box::new(a.clone()), Box::new(FnDisposable::new(|| {}))];
    list.iter().for_each(|d| d.dispose());
    assert!(list.iter().all(|d| d.is_disposed()));
    assert!(a.is_disposed());
  }
}
