//! Embedded SQLite implementation of [`KeyValueStore`]. A single
//! `kv_entries` table plays the role of the device key-value storage the
//! mobile original relied on; SQLite buys us durable writes without
//! inventing a file format of our own.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{params, Connection, OptionalExtension};

use super::KeyValueStore;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".worship-planner";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "storage.sqlite";

/// Key-value store backed by an embedded SQLite database. The connection is
/// wrapped in a `Mutex` so one handle can be shared across the seven state
/// adapters.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (and lazily create) the store at its default location inside
    /// the user's home directory.
    pub fn open_default() -> Result<Self> {
        let db_path = default_path()?;

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }

        Self::open_at(&db_path)
    }

    /// Open the store at an explicit path. Tests point this at a temporary
    /// directory; the default path goes through [`SqliteStore::open_default`].
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open SQLite storage")?;
        Self::from_connection(conn)
    }

    /// Fully in-memory store, handy for tests that never reopen.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory storage")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .context("failed to create kv_entries table")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM kv_entries WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to read storage key {key:?}"))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .with_context(|| format!("failed to write storage key {key:?}"))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv_entries WHERE key = ?1", params![key])
            .with_context(|| format!("failed to remove storage key {key:?}"))?;
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("DELETE FROM kv_entries WHERE key = ?1")
            .context("failed to prepare bulk remove")?;
        for key in keys {
            stmt.execute(params![key])
                .with_context(|| format!("failed to remove storage key {key:?}"))?;
        }
        Ok(())
    }
}

/// Resolve the absolute path to the SQLite file inside the user's home.
fn default_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
