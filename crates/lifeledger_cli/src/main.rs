//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lifeledger_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use lifeledger_core::db::open_db_in_memory;
use lifeledger_core::{Ledger, LedgerConfig, SqliteStateStore};

fn main() {
    println!("lifeledger_core version={}", lifeledger_core::core_version());

    // Exercise the store and ledger wiring against a throwaway database.
    match open_db_in_memory() {
        Ok(conn) => {
            let ledger =
                Ledger::load_or_default(SqliteStateStore::new(conn), LedgerConfig::default());
            println!("ledger initialized={}", ledger.is_initialized());
            println!("ledger balance={}", ledger.current_money());
        }
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    }
}
