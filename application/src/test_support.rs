//! Shared test doubles for the application services.

use crate::ports::clock::Clock;
use crate::ports::key_value_store::{KeyValueStore, StoreError};
use crate::ports::reply_generator::ReplyGenerator;
use chatpro_domain::Agent;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory store double; can be told to fail saves.
pub struct MapStore {
    entries: Mutex<HashMap<String, String>>,
    fail_saves: bool,
}

impl MapStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            fail_saves: false,
        })
    }

    pub fn failing_saves() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            fail_saves: true,
        })
    }

    pub fn with(key: &str, value: &str) -> Arc<Self> {
        let store = Self::new();
        store.put(key, value);
        store
    }

    pub fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MapStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::SaveFailed {
                key: key.to_string(),
                reason: "store offline".to_string(),
            });
        }
        self.put(key, value);
        Ok(())
    }
}

/// Clock pinned to a settable date.
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Arc<Self> {
        Arc::new(Self {
            today: Mutex::new(NaiveDate::from_ymd_opt(year, month, day).unwrap()),
        })
    }

    pub fn set(&self, year: i32, month: u32, day: u32) {
        *self.today.lock().unwrap() = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

/// Reply generator that echoes deterministically.
pub struct EchoReply;

impl ReplyGenerator for EchoReply {
    fn generate_reply(&self, agent: &Agent, user_text: &str) -> String {
        format!("{}: {}", agent.name, user_text)
    }
}
