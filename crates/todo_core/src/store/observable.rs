//! Observable snapshot container.
//!
//! # Responsibility
//! - Hold the current immutable snapshot of one piece of store state.
//! - Keep an ordered registry of listeners and invoke them synchronously.
//!
//! # Invariants
//! - A published snapshot is never mutated; writers replace it.
//! - Listeners run in subscription order.
//! - Listeners must not call back into the store that owns this container.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&Arc<T>)>;

/// Snapshot plus listener registry.
pub struct Observable<T> {
    snapshot: Arc<T>,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            snapshot: Arc::new(value),
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns a shared handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<T> {
        Arc::clone(&self.snapshot)
    }

    /// Borrows the current snapshot.
    pub fn get(&self) -> &T {
        &self.snapshot
    }

    /// Registers a listener.
    ///
    /// The listener is invoked once immediately with the current snapshot,
    /// then after every publish until unsubscribed.
    pub fn subscribe<F>(&mut self, mut listener: F) -> SubscriptionId
    where
        F: FnMut(&Arc<T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        listener(&self.snapshot);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replaces the snapshot and notifies listeners.
    pub(crate) fn set(&mut self, value: T) {
        self.stage(value);
        self.notify();
    }

    /// Replaces the snapshot without notifying.
    ///
    /// Pair with `notify` when several containers must be committed before
    /// any listener runs.
    pub(crate) fn stage(&mut self, value: T) {
        self.snapshot = Arc::new(value);
    }

    /// Invokes every listener with the current snapshot.
    pub(crate) fn notify(&mut self) {
        let snapshot = Arc::clone(&self.snapshot);
        for (_, listener) in &mut self.listeners {
            listener(&snapshot);
        }
    }
}

impl<T: Debug> Debug for Observable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("snapshot", &self.snapshot)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Observable;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribe_delivers_current_value_then_updates() {
        let mut observable = Observable::new(1_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        observable.subscribe(move |value| sink.borrow_mut().push(**value));

        observable.set(2);
        observable.set(3);

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let mut observable = Observable::new(String::from("a"));
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = observable.subscribe(move |_| *counter.borrow_mut() += 1);

        assert!(observable.unsubscribe(id));
        assert!(!observable.unsubscribe(id));
        observable.set(String::from("b"));

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(observable.listener_count(), 0);
    }

    #[test]
    fn stage_defers_notification_until_notify() {
        let mut observable = Observable::new(0_i32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        observable.subscribe(move |value| sink.borrow_mut().push(**value));

        observable.stage(5);
        assert_eq!(*observable.get(), 5);
        assert_eq!(*seen.borrow(), vec![0]);

        observable.notify();
        assert_eq!(*seen.borrow(), vec![0, 5]);
    }

    #[test]
    fn old_snapshot_is_unchanged_after_publish() {
        let mut observable = Observable::new(vec![1, 2]);
        let before = observable.snapshot();
        observable.set(vec![3]);

        assert_eq!(*before, vec![1, 2]);
        assert_eq!(*observable.get(), vec![3]);
    }
}
