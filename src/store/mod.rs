//! Device-storage abstraction. Every collection lives under one string key
//! whose value is an opaque serialized blob; the repositories in
//! [`crate::db`] never see anything richer than get/set/remove.

mod memory;
mod sqlite;

use anyhow::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String-keyed blob storage. Implementations must be usable from behind a
/// shared reference because the state adapters hold the store in an `Arc`.
///
/// A single call is the unit of consistency: nothing here coordinates a
/// read followed by a write, so callers that need read-modify-write
/// atomicity across threads have to serialize access themselves.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key in `keys`. Used by bulk wipes so backends can batch
    /// the deletes.
    fn remove_many(&self, keys: &[&str]) -> Result<()>;
}
