//! Subscription channels: ordered observer registries with isolated delivery.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{trace, warn};

/// Handle returned by [`Channel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionKey(u64);

impl SubscriptionKey {
    /// Key handed out after disposal; it never matches a registration.
    const INERT: Self = Self(0);
}

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A named broadcast point subscribers attach handlers to.
///
/// Handlers run synchronously in subscription order on every publish. Each
/// invocation is isolated: a panicking handler is logged and the remaining
/// handlers on the same publish still run. Channels share their owning hub's
/// disposed flag; once it is set, subscribe and publish become silent no-ops
/// so residual in-flight operations cannot crash the disposal sequence.
pub struct Channel<T> {
    name: &'static str,
    disposed: Arc<AtomicBool>,
    state: Mutex<ChannelState<T>>,
}

struct ChannelState<T> {
    handlers: Vec<(SubscriptionKey, Handler<T>)>,
    next_key: u64,
}

impl<T> Channel<T> {
    pub(crate) fn new(name: &'static str, disposed: Arc<AtomicBool>) -> Self {
        Self {
            name,
            disposed,
            state: Mutex::new(ChannelState {
                handlers: Vec::new(),
                next_key: 1,
            }),
        }
    }

    /// Channel name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Register a handler. Never fails; duplicate registrations of the same
    /// closure all fire independently. Returns an inert key after disposal.
    pub fn subscribe(&self, handler: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionKey {
        if self.disposed.load(Ordering::SeqCst) {
            trace!(channel = self.name, "subscribe ignored after disposal");
            return SubscriptionKey::INERT;
        }
        let mut state = self.lock_state();
        let key = SubscriptionKey(state.next_key);
        state.next_key = state.next_key.saturating_add(1);
        state.handlers.push((key, Arc::new(handler)));
        key
    }

    /// Remove a handler. Unknown or already-removed keys are ignored.
    pub fn unsubscribe(&self, key: SubscriptionKey) {
        self.lock_state()
            .handlers
            .retain(|(existing, _)| *existing != key);
    }

    /// Invoke every registered handler with `payload`, in subscription order.
    pub fn publish(&self, payload: &T) {
        if self.disposed.load(Ordering::SeqCst) {
            trace!(channel = self.name, "publish ignored after disposal");
            return;
        }
        // Snapshot outside the lock so handlers may subscribe or unsubscribe
        // reentrantly without deadlocking.
        let handlers: Vec<Handler<T>> = self
            .lock_state()
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(payload))).is_err() {
                warn!(
                    channel = self.name,
                    "event handler panicked; remaining handlers still run"
                );
            }
        }
    }

    /// Number of currently registered handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock_state().handlers.len()
    }

    pub(crate) fn clear(&self) {
        self.lock_state().handlers.clear();
    }

    fn lock_state(&self) -> MutexGuard<'_, ChannelState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
