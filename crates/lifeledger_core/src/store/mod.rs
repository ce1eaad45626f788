//! Persistence collaborator for the ledger aggregate.
//!
//! # Responsibility
//! - Define the storage contract the ledger writes through.
//! - Keep SQL and JSON details out of the state machine.
//!
//! # Invariants
//! - The aggregate is stored as one serialized unit under one key; the
//!   last-active timestamp lives under a second key.
//! - Malformed stored data falls back to defaults; it never throws into
//!   the ledger.

pub mod sqlite_store;

pub use sqlite_store::SqliteStateStore;

use crate::error::StoreResult;
use crate::model::state::UserState;

/// Storage key holding the serialized aggregate.
pub const STATE_KEY: &str = "lifeLedgerState";
/// Storage key holding the last-active timestamp (epoch ms, as a string).
pub const LAST_ACTIVE_KEY: &str = "lastActiveTime";

/// Key-value storage contract consumed by the ledger.
///
/// Implementations must treat malformed stored values as absent (returning
/// `Ok(None)`) rather than erroring, so a corrupt record degrades to a
/// fresh aggregate instead of wedging the ledger.
pub trait StateStore {
    /// Loads the persisted aggregate, or `None` when absent or malformed.
    fn load(&self) -> StoreResult<Option<UserState>>;
    /// Persists the whole aggregate as one unit.
    fn save(&self, state: &UserState) -> StoreResult<()>;
    /// Loads the last-active timestamp, or `None` when absent or malformed.
    fn load_last_active(&self) -> StoreResult<Option<i64>>;
    /// Persists the last-active timestamp.
    fn save_last_active(&self, epoch_ms: i64) -> StoreResult<()>;
    /// Removes both storage keys. Backs the explicit reset operation.
    fn clear(&self) -> StoreResult<()>;
}
