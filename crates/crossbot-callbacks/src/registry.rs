//! Process-wide store of rendered button callbacks.
//!
//! Renderers register a [`Callback`] for every button they emit and embed the
//! returned id in the platform payload. When the button is pressed the
//! adapter looks the id up again. One registry is shared by every platform
//! loop, so all operations take `&self`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbot_core::config::RegistryConfig;
use crossbot_core::Callback;
use dashmap::DashMap;
use tracing::debug;

struct Entry {
    callback: Callback,
    inserted: Instant,
}

/// Concurrent id → [`Callback`] map, bounded by capacity and age.
pub struct CallbackRegistry {
    entries: DashMap<String, Entry>,
    /// Ids in registration order. May still hold ids that were already
    /// removed; those are skipped during eviction.
    order: Mutex<VecDeque<String>>,
    next_id: AtomicU64,
    capacity: usize,
    /// `None` disables expiry.
    ttl: Option<Duration>,
}

impl CallbackRegistry {
    pub fn new(config: &RegistryConfig) -> Arc<Self> {
        let ttl = (config.ttl_secs > 0).then(|| Duration::from_secs(config.ttl_secs));
        Self::with_limits(config.capacity, ttl)
    }

    /// Build a registry with explicit limits. A capacity of zero is treated as one.
    pub fn with_limits(capacity: usize, ttl: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
            ttl,
        })
    }

    /// Store a callback and return its id. Ids are decimal strings and are
    /// never handed out twice by the same registry.
    pub fn register(&self, callback: Callback) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        self.entries.insert(
            id.clone(),
            Entry {
                callback,
                inserted: Instant::now(),
            },
        );

        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        order.push_back(id.clone());

        while self.entries.len() > self.capacity {
            let Some(oldest) = order.pop_front() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                debug!(id = %oldest, "callback evicted, registry at capacity");
            }
        }
        if order.len() > self.capacity.saturating_mul(2) {
            order.retain(|id| self.entries.contains_key(id));
        }

        id
    }

    /// Fetch a callback without removing it, so a button can be pressed more
    /// than once. Unknown and expired ids return `None`.
    pub fn lookup(&self, id: &str) -> Option<Callback> {
        let entry = self.entries.get(id)?;
        if !self.is_expired(entry.inserted) {
            return Some(entry.callback.clone());
        }
        drop(entry);

        if self
            .entries
            .remove_if(id, |_, e| self.is_expired(e.inserted))
            .is_some()
        {
            debug!(id = %id, "callback expired");
        }
        None
    }

    /// Remove a callback explicitly, returning it if it was still live.
    pub fn remove(&self, id: &str) -> Option<Callback> {
        self.entries.remove(id).map(|(_, e)| e.callback)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        if self.ttl.is_none() {
            return 0;
        }
        let before = self.entries.len();
        self.entries.retain(|_, e| !self.is_expired(e.inserted));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "expired callbacks purged");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_expired(&self, inserted: Instant) -> bool {
        self.ttl.is_some_and(|ttl| inserted.elapsed() >= ttl)
    }
}
