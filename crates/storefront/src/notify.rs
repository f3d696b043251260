//! Change notification between stores.
//!
//! Stores publish events through a [`ChangeNotifier`]; interested parties
//! register callbacks and get invoked synchronously on every event. The
//! session wiring uses this to tell the cart and favorites stores about auth
//! transitions so they can switch storage namespaces.

use std::sync::{Arc, Mutex};

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// A synchronous publish/subscribe channel for store events.
///
/// Callbacks run on the notifying thread while no store locks are held, so a
/// callback may call back into the emitting store.
pub struct ChangeNotifier<E> {
    subscribers: Mutex<Vec<(SubscriberId, Callback<E>)>>,
    next_id: Mutex<u64>,
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: Mutex::new(0),
        }
    }
}

impl<E> ChangeNotifier<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for future events.
    pub fn subscribe(&self, callback: impl Fn(&E) + Send + Sync + 'static) -> SubscriberId {
        let id = {
            let mut next = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
            *next += 1;
            SubscriberId(*next)
        };
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.push((id, Arc::new(callback)));
        id
    }

    /// Remove a previously registered callback. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every subscriber, in subscription order.
    ///
    /// The subscriber list is snapshotted before any callback runs, so a
    /// callback may subscribe, unsubscribe, or notify again without
    /// deadlocking. Subscribers added during delivery see only later events.
    pub fn notify(&self, event: &E) {
        let callbacks: Vec<Callback<E>> = {
            let subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subs.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in callbacks {
            callback(event);
        }
    }
}

impl<E> std::fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .subscribers
            .lock()
            .map(|s| s.len())
            .unwrap_or_default();
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_subscribers_receive_events() {
        let notifier = ChangeNotifier::<u32>::new();
        let seen = Arc::new(AtomicU32::new(0));
        let seen_clone = Arc::clone(&seen);
        notifier.subscribe(move |e| {
            seen_clone.fetch_add(*e, Ordering::SeqCst);
        });

        notifier.notify(&3);
        notifier.notify(&4);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::<u32>::new();
        let seen = Arc::new(AtomicU32::new(0));
        let seen_clone = Arc::clone(&seen);
        let id = notifier.subscribe(move |e| {
            seen_clone.fetch_add(*e, Ordering::SeqCst);
        });

        notifier.notify(&1);
        notifier.unsubscribe(id);
        notifier.notify(&1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id_is_noop() {
        let notifier = ChangeNotifier::<u32>::new();
        let id = notifier.subscribe(|_| {});
        notifier.unsubscribe(id);
        notifier.unsubscribe(id);
    }

    #[test]
    fn test_callback_may_notify_again() {
        let notifier = Arc::new(ChangeNotifier::<u32>::new());
        let seen = Arc::new(AtomicU32::new(0));

        let inner = Arc::clone(&notifier);
        let seen_clone = Arc::clone(&seen);
        notifier.subscribe(move |e| {
            seen_clone.fetch_add(*e, Ordering::SeqCst);
            if *e > 0 {
                inner.notify(&(e - 1));
            }
        });

        notifier.notify(&2);
        // 2, then the nested 1 and 0.
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_callback_may_unsubscribe_itself() {
        let notifier = Arc::new(ChangeNotifier::<u32>::new());
        let seen = Arc::new(AtomicU32::new(0));

        let inner = Arc::clone(&notifier);
        let seen_clone = Arc::clone(&seen);
        let slot = Arc::new(Mutex::new(None::<SubscriberId>));
        let slot_clone = Arc::clone(&slot);
        let id = notifier.subscribe(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *slot_clone.lock().unwrap() {
                inner.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        notifier.notify(&0);
        notifier.notify(&0);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
