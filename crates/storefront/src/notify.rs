//! Change notification registry.
//!
//! Views register zero-argument callbacks and re-read whatever state they
//! care about when called. The store fires every callback synchronously, in
//! registration order, after a mutation has been fully applied.
//!
//! Callbacks run with no registry lock held, so a callback may read the
//! store, subscribe, unsubscribe or even mutate the store again.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::trace;

/// A registered change callback.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Identifier of a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Registry of change listeners.
///
/// Cheaply cloneable; clones share the same listeners.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ChangeNotifier {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// unsubscribed or dropped. Use [`Subscription::detach`] to keep it for
    /// the lifetime of the notifier.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        trace!(listener_id = id.0, "listener subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Remove a listener by ID.
    ///
    /// Returns `true` if the listener was registered. Removing an unknown or
    /// already-removed listener is a no-op.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        remove_listener(&self.registry, id)
    }

    /// Invoke every registered listener in registration order.
    pub fn notify(&self) {
        let listeners: Vec<Listener> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        trace!(listeners = listeners.len(), "notifying listeners");
        for listener in listeners {
            listener();
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

/// Handle to a registered listener.
///
/// Dropping the handle unsubscribes the listener.
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
#[derive(Debug)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// The listener's ID.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            remove_listener(&registry, self.id);
        }
    }

    /// Keep the listener registered after this handle is dropped.
    ///
    /// It can still be removed with [`ChangeNotifier::unsubscribe`].
    pub fn detach(mut self) -> ListenerId {
        self.registry = Weak::new();
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

fn remove_listener(registry: &Mutex<Registry>, id: ListenerId) -> bool {
    let mut registry = lock(registry);
    let before = registry.listeners.len();
    registry.listeners.retain(|(listener_id, _)| *listener_id != id);
    let removed = registry.listeners.len() != before;
    if removed {
        trace!(listener_id = id.0, "listener unsubscribed");
    }
    removed
}

/// Listeners never leave the registry half-updated, so a poisoned lock is
/// still safe to use.
fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
