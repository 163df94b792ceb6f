//! Anode supply
//!
//! The high-voltage converter enable line and the anode PWM that sets
//! average tube intensity. The two are deliberately independent: dropping
//! the level to zero does not drop the converter and `set_hv` never
//! touches the level - the engine owns that coordination.

use horologion_core::traits::AnodePower;

use crate::pins::{OutputPin, PwmPin};

/// The tube power rail.
pub struct AnodeSupply<H, P> {
    hv: H,
    pwm: P,
    level: u8,
    hv_on: bool,
}

impl<H: OutputPin, P: PwmPin> AnodeSupply<H, P> {
    /// Take the supply pins, starting dark with the converter disabled.
    pub fn new(mut hv: H, mut pwm: P) -> Self {
        hv.set_low();
        pwm.set_duty(0);
        Self {
            hv,
            pwm,
            level: 0,
            hv_on: false,
        }
    }
}

impl<H: OutputPin, P: PwmPin> AnodePower for AnodeSupply<H, P> {
    fn set_brightness(&mut self, level: u8) {
        self.pwm.set_duty(level);
        self.level = level;
    }

    fn brightness(&self) -> u8 {
        self.level
    }

    fn set_hv(&mut self, on: bool) {
        if on {
            self.hv.set_high();
        } else {
            self.hv.set_low();
        }
        self.hv_on = on;
    }

    fn is_hv_on(&self) -> bool {
        self.hv_on
    }
}
