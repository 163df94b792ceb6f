//! Engine events
//!
//! Returned from engine calls so the platform layer can log them and carry
//! out the few actions that need hardware the core cannot reach (the
//! reset register). The core never logs on its own.

use heapless::Vec;

/// Upper bound on events produced by a single engine call.
pub const MAX_EVENTS: usize = 8;

/// What happened during an engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineEvent {
    /// The displayed time changed
    TimeShown { hour: u8, minute: u8 },
    /// Ramp-down toward dark tubes started
    PowerDownStarted,
    /// Brightness reached zero; high voltage was dropped
    PoweredDown,
    /// Ramp-up toward the day level started (high voltage asserted)
    PowerUpStarted,
    /// Brightness reached the day level
    PoweredUp,
    /// Cathode-depolarization cycle started
    CycleStarted,
    /// Cathode-depolarization cycle stopped
    CycleStopped,
    /// Roll animation started
    RollStarted,
    /// Roll animation stopped
    RollStopped,
    /// A reboot was requested; the caller must perform it
    RestartRequested,
}

/// Event list returned by one engine call.
pub type Events = Vec<EngineEvent, MAX_EVENTS>;
