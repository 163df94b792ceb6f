//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in horologion-core:
//!
//! - Shift-register tube bus (four digits behind two daisy-chained bytes)
//! - Anode supply (high-voltage enable + anode PWM)
//!
//! Drivers are generic over the small pin traits in [`pins`], so they run
//! against mock pins on the host and against the chip HAL on the board.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod pins;
pub mod supply;

pub use bus::ShiftRegisterBus;
pub use pins::{OutputPin, PwmPin};
pub use supply::AnodeSupply;
