//! In-process subscriptions for the roster store.
//!
//! - The store publishes its full `Snapshot` once after every state change.
//! - Dropping a `SubscriptionHandle` unsubscribes.
//!
//! Notes:
//! - Listeners run synchronously on the caller's thread, outside the registry lock,
//!   after the operation has completed (they never observe a partial update).
//! - The registry is owned by one store instance.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use crate::metrics;
use crate::store::Snapshot;

pub type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync + 'static>;

#[derive(Default)]
struct SubInner {
    next_id: u64,
    // BTreeMap keeps delivery in subscription order
    subs: BTreeMap<u64, Listener>,
}

pub struct SubRegistry {
    inner: Mutex<SubInner>,
}

impl SubRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(SubInner::default()),
        })
    }

    pub fn subscribe(self: &Arc<Self>, listener: Listener) -> SubscriptionHandle {
        let mut g = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let id = g.next_id;
        g.next_id = g.next_id.wrapping_add(1);
        g.subs.insert(id, listener);
        drop(g);
        SubscriptionHandle {
            id,
            reg: Arc::downgrade(self),
        }
    }

    pub fn publish(&self, snap: &Snapshot) {
        let listeners: Vec<Listener> = {
            let g = self.inner.lock().unwrap_or_else(|p| p.into_inner());
            g.subs.values().cloned().collect()
        };
        metrics::record_notification();
        for l in listeners {
            l(snap);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn unsubscribe(&self, id: u64) {
        let mut g = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        g.subs.remove(&id);
    }
}

/// RAII handle: unsubscribes on drop.
pub struct SubscriptionHandle {
    id: u64,
    reg: Weak<SubRegistry>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(reg) = self.reg.upgrade() {
            reg.unsubscribe(self.id);
        }
    }
}

pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&Snapshot) + Send + Sync + 'static,
{
    Arc::new(f)
}
