//! Released-state change notification.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Name of the attribute reported when a disposable becomes released.
pub const IS_DISPOSED: &str = "is_disposed";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a disposable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisposableId(u64);

impl DisposableId {
    pub(crate) fn next() -> Self {
        DisposableId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric identity.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DisposableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A change notification: `sender` changed the attribute named `property`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyChanged {
    pub sender: DisposableId,
    pub property: &'static str,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&PropertyChanged) + Send + Sync>;

/// Registered change listeners of one disposable.
#[derive(Default)]
pub(crate) struct Subscribers {
    next: AtomicU64,
    handlers: Mutex<Vec<(SubscriptionId, Handler)>>,
}

impl Subscribers {
    pub(crate) fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next.fetch_add(1, Ordering::Relaxed));
        self.handlers.lock().push((id, Arc::new(handler)));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        handlers.len() != before
    }

    /// Invokes every handler outside the lock, so handlers may unsubscribe.
    pub(crate) fn raise(&self, event: &PropertyChanged) {
        let snapshot: Vec<Handler> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in snapshot {
            handler(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.lock().len()
    }
}
