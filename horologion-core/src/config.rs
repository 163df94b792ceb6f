//! Configuration type definitions
//!
//! Compile-time defaults only: there is no settings persistence, the
//! device always boots with this configuration and forgets command-line
//! adjustments on restart.

/// Clock behavior configuration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Hour at which the tubes power up; they stay dark in
    /// `[0, day_start_hour)` to spare the cathodes overnight
    pub day_start_hour: u8,
    /// Steady daytime brightness target (0-255)
    pub day_brightness: u8,
    /// Ramp step interval in ms (one brightness step per firing)
    pub ramp_period_ms: u32,
    /// Cross-fade duration for ordinary time changes, ms
    pub fade_ms: u32,
    /// Depolarization cycle: interval between digit advances, ms
    pub cycle_period_ms: u32,
    /// Depolarization cycle: fade duration per digit advance, ms
    pub cycle_fade_ms: u32,
    /// Minutes past day start during which the depolarization cycle runs
    pub cycle_window_min: u8,
    /// Roll effect: interval between rotations, ms
    pub roll_period_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_brightness: 127,
            ramp_period_ms: 100,
            fade_ms: 1000,
            cycle_period_ms: 500,
            cycle_fade_ms: 400,
            cycle_window_min: 5,
            roll_period_ms: 2000,
        }
    }
}
