//! Pomodoro phase machine.
//!
//! # Responsibility
//! - Track work/break phases and remaining seconds; no timer ownership,
//!   no countdown display.
//!
//! # Invariants
//! - A work phase that runs out yields exactly one `PhaseEnd::Work`; the
//!   caller turns it into one `record_focus_session` credit.
//! - The running flag doubles as the decay-suppression signal: while a
//!   session runs, the host sets the ledger's focus flag.

/// Which interval the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    Work,
    Break,
}

/// Emitted when a phase runs out; names the phase that just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEnd {
    Work,
    Break,
}

/// Work/break countdown state. The host drives it one second at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    work_secs: u32,
    break_secs: u32,
    phase: FocusPhase,
    remaining_secs: u32,
    running: bool,
}

impl FocusTimer {
    /// Creates a paused timer positioned at the start of a work phase.
    pub fn new(work_secs: u32, break_secs: u32) -> Self {
        Self {
            work_secs,
            break_secs,
            phase: FocusPhase::Work,
            remaining_secs: work_secs,
            running: false,
        }
    }

    /// Standard 25/5 minute configuration.
    pub fn standard() -> Self {
        Self::new(25 * 60, 5 * 60)
    }

    /// Starts (or resumes) the countdown. Starting a fresh timer begins a
    /// work phase.
    pub fn start(&mut self) {
        if !self.running && self.remaining_secs == 0 {
            self.phase = FocusPhase::Work;
            self.remaining_secs = self.work_secs;
        }
        self.running = true;
    }

    /// Pauses the countdown without losing position.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops and rewinds to the start of a work phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = FocusPhase::Work;
        self.remaining_secs = self.work_secs;
    }

    /// Advances the countdown by one second.
    ///
    /// When the current phase runs out, flips to the other phase and
    /// reports which one ended. A `PhaseEnd::Work` is the host's cue to
    /// credit a focus session on the ledger.
    pub fn tick_second(&mut self) -> Option<PhaseEnd> {
        if !self.running {
            return None;
        }

        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return None;
        }

        match self.phase {
            FocusPhase::Work => {
                self.phase = FocusPhase::Break;
                self.remaining_secs = self.break_secs;
                Some(PhaseEnd::Work)
            }
            FocusPhase::Break => {
                self.phase = FocusPhase::Work;
                self.remaining_secs = self.work_secs;
                Some(PhaseEnd::Break)
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }
}
