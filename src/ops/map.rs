use crate::{
  event::Event,
  signal::Signal,
  sink::{Channel, Emitter},
};

impl<V, E> Signal<V, E>
where
  V: Clone + Send + 'static,
  E: Clone + Send + 'static,
{
  /// Creates a new signal which calls a closure on each value and emits its
  /// return value instead.
  ///
  /// The derived signal has its own observers and state. It is fed by one
  /// internal, direct subscription to `self`, so `f` runs synchronously inside
  /// the source's publish. `Completed` and `Error` pass through untouched and
  /// terminate the derived signal as well.
  ///
  /// Mapping a lazy signal subscribes to it and therefore starts it.
  ///
  /// The forwarding subscription is never disposed: the source keeps one
  /// registry entry, and with it the derived signal, for every `map` call
  /// until the source terminates. Map a long-lived source once and share the
  /// derived signal instead of calling `map` repeatedly.
  ///
  /// ```rust
  /// use rxsignal::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let Channel { input, output } = Signal::<String>::channel();
  /// let parsed = Arc::new(Mutex::new(vec![]));
  /// let c_parsed = parsed.clone();
  /// let _sub = output
  ///   .map(|s| s.parse::<i32>().unwrap_or_default())
  ///   .subscribe_values(move |v| c_parsed.lock().unwrap().push(v));
  ///
  /// input.send_value("10".to_owned());
  /// assert_eq!(*parsed.lock().unwrap(), vec![10]);
  /// ```
  pub fn map<U, F>(&self, f: F) -> Signal<U, E>
  where
    U: Clone + Send + 'static,
    F: Fn(V) -> U + Send + Sync + 'static,
  {
    let Channel { input, output } = Signal::<U, E>::channel();
    let forward = self.subscribe(move |event: Event<V, E>| input.send(event.map(&f)));
    // lives as long as the source keeps its observers
    drop(forward);
    output
  }
}
