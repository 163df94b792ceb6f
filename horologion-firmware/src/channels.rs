//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use horologion_core::command::Command;

/// Channel capacity for parsed console commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// A wall-clock sync from the co-processor (local civil time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct TimeSync {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Firmware-update lifecycle notifications from the co-processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum UpdateEvent {
    /// Transfer about to begin: drop HV, release the display
    Started,
    /// Transfer finished (log only)
    Finished,
    /// Transfer failed (log only)
    Failed,
}

/// Parsed console commands awaiting the engine
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Latest wall-clock sync (a newer sync overwrites an unconsumed one)
pub static TIME_SYNC: Signal<CriticalSectionRawMutex, TimeSync> = Signal::new();

/// Update lifecycle notifications
pub static UPDATE_EVENT: Signal<CriticalSectionRawMutex, UpdateEvent> = Signal::new();

/// Signal that the console should answer with the help text
pub static HELP_REQUESTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();
