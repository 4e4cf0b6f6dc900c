//! Network reachability observation
//!
//! Reachability is an injected capability rather than process-wide state.
//! A platform integration feeds [`WatchReachability::update`]; consumers
//! either poll [`ReachabilityMonitor::is_reachable`], register a callback
//! through [`ReachabilityMonitor::subscribe`], or await changes on
//! [`WatchReachability::changes`]. The API client itself never consults it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::sync::watch;
use tracing::debug;

/// Current network conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reachability {
    /// Whether any network path is available
    pub connected: bool,
    /// Whether the available path is metered (cellular, hotspot)
    pub expensive: bool,
}

/// Callback invoked with each new [`Reachability`] value.
pub type ReachabilityCallback = Box<dyn Fn(Reachability) + Send + Sync>;

/// Observes network reachability.
pub trait ReachabilityMonitor: Send + Sync {
    /// Whether the network is currently reachable.
    fn is_reachable(&self) -> bool;

    /// Register `callback` for every subsequent change.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    fn subscribe(&self, callback: ReachabilityCallback) -> Subscription;
}

type Registry = Mutex<BTreeMap<u64, Arc<dyn Fn(Reachability) + Send + Sync>>>;

struct Shared {
    state: watch::Sender<Reachability>,
    callbacks: Registry,
    next_id: AtomicU64,
}

impl Shared {
    fn callbacks(&self) -> MutexGuard<'_, BTreeMap<u64, Arc<dyn Fn(Reachability) + Send + Sync>>> {
        self.callbacks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// [`ReachabilityMonitor`] backed by a `tokio::sync::watch` channel.
#[derive(Clone)]
pub struct WatchReachability {
    shared: Arc<Shared>,
}

impl WatchReachability {
    /// Create a monitor with an initial state.
    pub fn new(initial: Reachability) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                state,
                callbacks: Mutex::new(BTreeMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// The current state.
    pub fn current(&self) -> Reachability {
        *self.shared.state.borrow()
    }

    /// Publish a new state. Callbacks run only when the state changed.
    pub fn update(&self, next: Reachability) {
        let changed = self.shared.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if !changed {
            return;
        }

        debug!(
            connected = next.connected,
            expensive = next.expensive,
            "Reachability changed"
        );
        // Snapshot so callbacks may subscribe or unsubscribe re-entrantly.
        let callbacks: Vec<_> = self.shared.callbacks().values().cloned().collect();
        for callback in callbacks {
            callback(next);
        }
    }

    /// A receiver that observes every state change.
    pub fn changes(&self) -> watch::Receiver<Reachability> {
        self.shared.state.subscribe()
    }
}

impl Default for WatchReachability {
    fn default() -> Self {
        Self::new(Reachability::default())
    }
}

impl std::fmt::Debug for WatchReachability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchReachability")
            .field("current", &self.current())
            .field("subscribers", &self.shared.callbacks().len())
            .finish()
    }
}

impl ReachabilityMonitor for WatchReachability {
    fn is_reachable(&self) -> bool {
        self.current().connected
    }

    fn subscribe(&self, callback: ReachabilityCallback) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.callbacks().insert(id, Arc::from(callback));
        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Keeps a reachability callback registered while alive.
#[must_use = "dropping the subscription unregisters the callback"]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.callbacks().remove(&self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ONLINE: Reachability = Reachability {
        connected: true,
        expensive: false,
    };

    #[test]
    fn test_subscribe_and_unsubscribe_on_drop() {
        let monitor = WatchReachability::default();
        assert!(!monitor.is_reachable());

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = monitor.subscribe(Box::new(move |state| {
            assert!(state.connected);
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        monitor.update(ONLINE);
        // Unchanged state does not notify.
        monitor.update(ONLINE);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(monitor.is_reachable());

        drop(subscription);
        monitor.update(Reachability::default());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriptions_are_independent() {
        let monitor = WatchReachability::default();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        let keep = monitor.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = Arc::clone(&second);
        let dropped = monitor.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_ne!(keep.id, dropped.id);

        drop(dropped);
        monitor.update(ONLINE);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        drop(keep);
    }

    #[test]
    fn test_subscription_outlives_monitor() {
        let monitor = WatchReachability::default();
        let subscription = monitor.subscribe(Box::new(|_| {}));
        drop(monitor);
        drop(subscription);
    }

    #[tokio::test]
    async fn test_changes_receiver() {
        let monitor = WatchReachability::default();
        let mut changes = monitor.changes();

        let updater = monitor.clone();
        tokio::spawn(async move { updater.update(ONLINE) });

        changes.changed().await.unwrap();
        assert_eq!(*changes.borrow(), ONLINE);
    }
}
