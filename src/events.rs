//! Host event bus shared by the engine and its plugins.
//!
//! Plugins reserve event names at registration and publish through this
//! bus; any collaborator can subscribe. The bus is a composed member of
//! the engine rather than a base class, and exposes only `on`/`off`/`emit`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    event: String,
    id: u64,
}

impl Subscription {
    /// The event name this subscription listens to.
    pub fn event(&self) -> &str {
        &self.event
    }
}

struct Subscriber {
    id: u64,
    callback: Callback,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: HashMap<String, Vec<Subscriber>>,
}

/// Publish/subscribe event bus keyed by event name.
///
/// Dispatch is synchronous and follows subscription order. Callbacks run
/// without the bus lock held, so a callback may subscribe, unsubscribe,
/// or emit again.
#[derive(Default)]
pub struct EventBus {
    inner: Mutex<BusInner>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an event name.
    pub fn on(
        &self,
        event: impl Into<String>,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Subscription {
        let event = event.into();
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .subscribers
            .entry(event.clone())
            .or_default()
            .push(Subscriber { id, callback: Arc::new(callback) });

        Subscription { event, id }
    }

    /// Remove a subscription. Removing one that is already gone is a no-op.
    pub fn off(&self, subscription: &Subscription) {
        let mut inner = self.inner.lock();
        if let Some(subscribers) = inner.subscribers.get_mut(&subscription.event) {
            subscribers.retain(|s| s.id != subscription.id);
            if subscribers.is_empty() {
                inner.subscribers.remove(&subscription.event);
            }
        }
    }

    /// Emit an event to all current subscribers, in subscription order.
    pub fn emit(&self, event: &str, payload: &Value) {
        let callbacks: Vec<Callback> = {
            let inner = self.inner.lock();
            match inner.subscribers.get(event) {
                Some(subscribers) => {
                    subscribers.iter().map(|s| Arc::clone(&s.callback)).collect()
                }
                None => return,
            }
        };

        debug!(event, subscribers = callbacks.len(), "emitting event");
        for callback in callbacks {
            callback(payload);
        }
    }

    /// Number of live subscriptions for an event name.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.inner.lock().subscribers.get(event).map_or(0, Vec::len)
    }

    /// Drop all subscriptions.
    pub(crate) fn clear(&self) {
        self.inner.lock().subscribers.clear();
    }
}
