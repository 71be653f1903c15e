//! Snapshot listeners.

use std::sync::{Arc, Mutex, Weak};

type Listener<R> = Arc<dyn Fn(&[R]) + Send + Sync>;

struct Registry<R> {
    next_id: u64,
    listeners: Vec<(u64, Listener<R>)>,
}

/// The listeners registered on one store.
pub(crate) struct Subscribers<R> {
    registry: Arc<Mutex<Registry<R>>>,
}

impl<R: Send + Sync + 'static> Subscribers<R> {
    pub(crate) fn new() -> Self {
        Subscribers {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub(crate) fn add<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[R]) + Send + Sync + 'static,
    {
        let id = {
            let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Arc::new(listener)));
            id
        };

        let registry: Weak<Mutex<Registry<R>>> = Arc::downgrade(&self.registry);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    let mut registry = registry.lock().unwrap_or_else(|e| e.into_inner());
                    registry.listeners.retain(|(other, _)| *other != id);
                }
            })),
        }
    }

    /// Call every listener with `snapshot`. Listeners run outside the lock,
    /// so they may subscribe or unsubscribe.
    pub(crate) fn notify(&self, snapshot: &[R]) {
        let listeners: Vec<Listener<R>> = {
            let registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            registry.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        for listener in listeners {
            listener(snapshot);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .listeners
            .len()
    }
}

/// Keeps a listener registered. Dropping it, or calling
/// [`Subscription::unsubscribe`], removes the listener.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_and_drop() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        let subscription = subscribers.add(move |snapshot: &[u32]| {
            counter.fetch_add(snapshot.len(), Ordering::SeqCst);
        });
        assert_eq!(subscribers.len(), 1);

        subscribers.notify(&[1, 2, 3]);
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        drop(subscription);
        assert_eq!(subscribers.len(), 0);

        subscribers.notify(&[1, 2, 3]);
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let first = subscribers.add(|_| {});
        let _second = subscribers.add(|_| {});

        first.unsubscribe();
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn test_subscription_outliving_store() {
        let subscribers: Subscribers<u32> = Subscribers::new();
        let subscription = subscribers.add(|_| {});
        drop(subscribers);
        // Must not panic
        drop(subscription);
    }
}
