//! Hardware abstraction traits
//!
//! The seam between the engine and the board: a tube display that latches
//! validated frames, and the anode power rail. Drivers implement these;
//! the engine and tests never touch real pins.

use crate::frame::DisplayFrame;

/// The four-tube display behind the shift-register bus.
pub trait TubeDisplay {
    /// Latch a validated frame onto all four tubes at once.
    ///
    /// Must complete in bounded, small time - it runs inside effect ticks.
    fn write_frame(&mut self, frame: DisplayFrame);

    /// The frame currently latched on the tubes.
    fn current_frame(&self) -> DisplayFrame;
}

/// Anode PWM plus the high-voltage converter enable line.
///
/// Brightness and high voltage are independent: `set_brightness` never
/// touches the enable line, and level 0 with HV asserted is a valid (dark)
/// state. Level 0 drives the anode line constantly low, 255 constantly
/// high, anything between a proportional duty cycle. Out-of-range input is
/// impossible by type; clamping happens at the command-parse boundary.
pub trait AnodePower {
    /// Set the average tube intensity (0 = dark, 255 = saturated).
    fn set_brightness(&mut self, level: u8);

    /// The last level set.
    fn brightness(&self) -> u8;

    /// Drive the high-voltage converter enable line directly.
    fn set_hv(&mut self, on: bool);

    /// Whether the enable line is currently asserted.
    fn is_hv_on(&self) -> bool;
}
