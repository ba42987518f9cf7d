//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Open the database file that holds the app's slots.
//! - Keep one text value per key in the `kv_slots` table.
//!
//! # Invariants
//! - The slot table layout is tracked through `PRAGMA user_version`.
//! - A file written by a newer layout is refused, never rewritten.

use super::{KeyValueStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Slot table layout written by this build.
pub const SLOT_SCHEMA_VERSION: u32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_SLOT_TABLE: &str = "
CREATE TABLE IF NOT EXISTS kv_slots (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value storage over an owned SQLite connection.
pub struct SqliteKeyValueStorage {
    conn: Connection,
}

impl SqliteKeyValueStorage {
    /// Opens (creating if needed) the slot database at `path`.
    ///
    /// # Side effects
    /// - Creates the file and the slot table on first use.
    /// - Emits `slot_db_open` events with duration and status.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::open_with("file", || Connection::open(path))
    }

    /// Opens a throwaway slot database that lives as long as the value.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::open_with("memory", Connection::open_in_memory)
    }

    /// Raw connection, for inspection and maintenance.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn open_with<F>(mode: &'static str, open: F) -> StorageResult<Self>
    where
        F: FnOnce() -> rusqlite::Result<Connection>,
    {
        let started_at = Instant::now();
        let result = open()
            .map_err(StorageError::from)
            .and_then(|mut conn| {
                conn.busy_timeout(BUSY_TIMEOUT)?;
                ensure_slot_table(&mut conn)?;
                Ok(conn)
            });

        match result {
            Ok(conn) => {
                info!(
                    "event=slot_db_open module=storage status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    "event=slot_db_open module=storage status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn ensure_slot_table(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SLOT_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            found,
            supported: SLOT_SCHEMA_VERSION,
        });
    }
    if found == SLOT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_SLOT_TABLE)?;
    tx.pragma_update(None, "user_version", SLOT_SCHEMA_VERSION)?;
    tx.commit()?;
    info!(
        "event=slot_table_create module=storage status=ok from_version={found} to_version={SLOT_SCHEMA_VERSION}"
    );
    Ok(())
}

impl KeyValueStorage for SqliteKeyValueStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
