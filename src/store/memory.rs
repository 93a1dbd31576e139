//! HashMap-backed implementation of [`KeyValueStore`]. Nothing survives the
//! process; tests and throwaway sessions are the audience.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};

use super::KeyValueStore;

/// In-memory key-value store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}
