//! Pin adapters from embassy-rp to the driver pin traits

use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use horologion_drivers::pins::{OutputPin, PwmPin};

/// PWM counter wrap value; one count per brightness step.
pub const PWM_TOP: u16 = 255;

/// A push-pull GPIO output.
pub struct RpOutput(Output<'static>);

impl RpOutput {
    pub fn new(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// The anode PWM channel.
///
/// Compare value 0 pins the line low; 255 is promoted past `top` so the
/// line stays constantly high. Both ends of the range are therefore free
/// of residual glitching, as the anode contract requires.
pub struct AnodePwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl AnodePwm {
    pub fn new(pwm: Pwm<'static>, config: PwmConfig) -> Self {
        Self { pwm, config }
    }
}

impl PwmPin for AnodePwm {
    fn set_duty(&mut self, duty: u8) {
        // compare > top keeps the output high for the whole period.
        self.config.compare_a = if duty == 255 {
            PWM_TOP + 1
        } else {
            u16::from(duty)
        };
        self.pwm.set_config(&self.config);
    }
}
