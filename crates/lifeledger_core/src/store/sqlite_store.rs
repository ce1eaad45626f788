//! SQLite-backed key-value state store.
//!
//! # Responsibility
//! - Persist the aggregate and last-active timestamp as JSON/text rows in
//!   the `kv` table.
//! - Drop malformed rows instead of surfacing them to the ledger.
//!
//! # Invariants
//! - Stored JSON uses the stable camelCase wire layout.
//! - A row that fails to parse is deleted and reported as absent.

use log::error;
use rusqlite::{params, Connection, OptionalExtension};

use super::{StateStore, LAST_ACTIVE_KEY, STATE_KEY};
use crate::error::StoreResult;
use crate::model::state::UserState;

/// Key-value store over a bootstrapped SQLite connection.
///
/// The connection must come from [`open_db`](crate::db::open_db) or
/// [`open_db_in_memory`](crate::db::open_db_in_memory) so the schema exists.
/// Owns its connection so a ledger can move across threads behind a mutex.
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    fn read_key(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write_key(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn drop_key(&self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }
}

impl StateStore for SqliteStateStore {
    fn load(&self) -> StoreResult<Option<UserState>> {
        let Some(raw) = self.read_key(STATE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserState>(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                error!(
                    "event=state_load module=store status=error error_code=malformed_state error={err}"
                );
                // Corrupt record: remove it so the next load starts clean.
                self.drop_key(STATE_KEY)?;
                Ok(None)
            }
        }
    }

    fn save(&self, state: &UserState) -> StoreResult<()> {
        let raw = serde_json::to_string(state)?;
        self.write_key(STATE_KEY, &raw)
    }

    fn load_last_active(&self) -> StoreResult<Option<i64>> {
        let Some(raw) = self.read_key(LAST_ACTIVE_KEY)? else {
            return Ok(None);
        };

        match raw.trim().parse::<i64>() {
            Ok(epoch_ms) => Ok(Some(epoch_ms)),
            Err(_) => {
                error!(
                    "event=last_active_load module=store status=error error_code=malformed_timestamp value={raw}"
                );
                self.drop_key(LAST_ACTIVE_KEY)?;
                Ok(None)
            }
        }
    }

    fn save_last_active(&self, epoch_ms: i64) -> StoreResult<()> {
        self.write_key(LAST_ACTIVE_KEY, &epoch_ms.to_string())
    }

    fn clear(&self) -> StoreResult<()> {
        self.drop_key(STATE_KEY)?;
        self.drop_key(LAST_ACTIVE_KEY)
    }
}
