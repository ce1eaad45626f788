//! Decay scheduler.
//!
//! # Responsibility
//! - Drive [`Ledger::tick`] on a fixed cadence from a background thread.
//! - Serialize scheduler mutations with other callers behind the shared
//!   ledger mutex.
//!
//! # Invariants
//! - Start is idempotent: starting again stops and replaces any prior
//!   ticker thread, never leaving two competing timers.
//! - Stop joins the thread; after `stop` returns, no further tick fires.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::info;

use crate::ledger::Ledger;
use crate::store::StateStore;

const STOP_POLL: Duration = Duration::from_millis(20);

/// Owns the single repeating decay timer for one ledger instance.
pub struct DecayScheduler {
    handle: Option<TickerHandle>,
}

struct TickerHandle {
    stop: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl DecayScheduler {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Installs the repeating tick, replacing any prior timer first.
    ///
    /// The production cadence comes from
    /// [`LedgerConfig::tick_interval_secs`](crate::config::LedgerConfig);
    /// tests pass millisecond intervals.
    pub fn start<S>(&mut self, ledger: Arc<Mutex<Ledger<S>>>, interval: Duration)
    where
        S: StateStore + Send + 'static,
    {
        // Cancel any prior timer before installing a new one.
        self.stop();

        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let join = thread::spawn(move || {
            let mut next_tick = Instant::now() + interval;
            while !flag.load(Ordering::Relaxed) {
                let now = Instant::now();
                if now < next_tick {
                    thread::sleep(STOP_POLL.min(next_tick - now));
                    continue;
                }
                next_tick += interval;

                let mut guard = match ledger.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.tick();
            }
        });

        self.handle = Some(TickerHandle { stop, join });
        info!(
            "event=scheduler_start module=scheduler status=ok interval_ms={}",
            interval.as_millis()
        );
    }

    /// Stops the timer and joins its thread. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop.store(true, Ordering::Relaxed);
            let _ = handle.join.join();
            info!("event=scheduler_stop module=scheduler status=ok");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Default for DecayScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DecayScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
