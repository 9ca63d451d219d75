//! Per-user, per-day message quota tracking.
//!
//! Counts are keyed by (user id, local calendar day). A new day means a new
//! key: the count implicitly resets at local midnight, and records for past
//! days are never consulted or mutated again. Stale records are inert and
//! left in the store.

use crate::ports::clock::Clock;
use crate::ports::key_value_store::{keys, KeyValueStore};
use chatpro_domain::{quota, PlanDefinition, QuotaKey};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Write-through daily message counter.
pub struct QuotaTracker {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    counts: Mutex<HashMap<QuotaKey, u32>>,
}

impl QuotaTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Messages the user has sent on the given day; 0 when no record exists.
    pub fn count(&self, user_id: &str, day: NaiveDate) -> u32 {
        let key = QuotaKey::new(user_id, day);
        let mut counts = self.counts.lock().expect("quota lock poisoned");
        if let Some(count) = counts.get(&key) {
            return *count;
        }
        let count = self.load_record(&key);
        counts.insert(key, count);
        count
    }

    /// Record one accepted message, persisting immediately.
    ///
    /// Returns the new count. A failed save is logged and the in-memory
    /// count still advances.
    pub fn increment(&self, user_id: &str, day: NaiveDate) -> u32 {
        let new_count = self.count(user_id, day) + 1;
        let key = QuotaKey::new(user_id, day);
        self.counts
            .lock()
            .expect("quota lock poisoned")
            .insert(key.clone(), new_count);
        let store_key = keys::message_count(key.user_id(), &key.day_str());
        if let Err(e) = self.store.save(&store_key, &new_count.to_string()) {
            warn!("Could not persist quota count: {}", e);
        }
        new_count
    }

    /// Whether the plan's finite daily limit has been reached.
    pub fn is_exhausted(&self, user_id: &str, day: NaiveDate, plan: &PlanDefinition) -> bool {
        quota::is_exhausted(self.count(user_id, day), plan)
    }

    /// Today's count for the user, per the injected clock.
    pub fn count_today(&self, user_id: &str) -> u32 {
        self.count(user_id, self.clock.today())
    }

    pub fn increment_today(&self, user_id: &str) -> u32 {
        self.increment(user_id, self.clock.today())
    }

    pub fn is_exhausted_today(&self, user_id: &str, plan: &PlanDefinition) -> bool {
        self.is_exhausted(user_id, self.clock.today(), plan)
    }

    fn load_record(&self, key: &QuotaKey) -> u32 {
        let store_key = keys::message_count(key.user_id(), &key.day_str());
        match self.store.load(&store_key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                warn!("Corrupt quota record under '{}', treating as 0", store_key);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("Could not load quota record, treating as 0: {}", e);
                0
            }
        }
    }
}
