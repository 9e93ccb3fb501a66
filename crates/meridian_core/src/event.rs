//! # Synchronous Events
//!
//! Listener lists used for definition-changed and geometry-changed
//! notifications. Delivery is synchronous on the raising thread.
//!
//! Raising takes a snapshot of the listeners before calling any of them, so a
//! listener may add or remove listeners, or raise further events, without
//! deadlocking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle returned by [`Event::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A list of callbacks invoked with a payload of type `T`.
pub struct Event<T> {
    listeners: Mutex<Vec<(ListenerId, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T> Event<T> {
    /// Creates an event without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers `listener` and returns the handle used to remove it.
    pub fn add_listener(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false when it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Invokes every listener registered at the time of the call.
    pub fn raise(&self, payload: &T) {
        let snapshot: Vec<Listener<T>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_add_raise_remove() {
        let event = Event::<u32>::new();
        let total = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&total);
        let id = event.add_listener(move |value| {
            counter.fetch_add(*value as usize, Ordering::SeqCst);
        });

        event.raise(&3);
        event.raise(&4);
        assert_eq!(total.load(Ordering::SeqCst), 7);

        assert!(event.remove_listener(id));
        assert!(!event.remove_listener(id));
        event.raise(&10);
        assert_eq!(total.load(Ordering::SeqCst), 7);
        assert_eq!(event.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_raise_reentrantly() {
        let event = Arc::new(Event::<u32>::new());
        let seen = Arc::new(AtomicUsize::new(0));
        let inner_event = Arc::downgrade(&event);
        let inner_seen = Arc::clone(&seen);
        event.add_listener(move |depth| {
            inner_seen.fetch_add(1, Ordering::SeqCst);
            if *depth == 0 {
                if let Some(event) = inner_event.upgrade() {
                    event.raise(&1);
                }
            }
        });

        event.raise(&0);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
