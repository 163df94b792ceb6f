//! Cooperative effect scheduler
//!
//! One poll timer per periodic effect plus at most one in-flight
//! cross-fade. The fade owns the display and the brightness level
//! exclusively: while one is running nothing else is polled, so a ramp
//! can never fight the fade envelope and no second fade can start.

pub mod fade;

pub use fade::{CrossFade, HALF_STEP_MS};

use crate::config::ClockConfig;
use crate::frame::DisplayFrame;
use crate::timer::PollTimer;
use crate::traits::{AnodePower, TubeDisplay};

/// What the periodic effects completed during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Ramp-up reached its target and stopped itself
    pub ramp_up_done: bool,
    /// Ramp-down reached zero and stopped itself
    pub ramp_down_done: bool,
}

/// The scheduler for every timed display effect.
#[derive(Debug)]
pub struct Effects {
    ramp_up: PollTimer,
    ramp_down: PollTimer,
    cycle: PollTimer,
    roll: PollTimer,
    fade: Option<CrossFade>,
    ramp_target: u8,
}

impl Effects {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            ramp_up: PollTimer::new(config.ramp_period_ms),
            ramp_down: PollTimer::new(config.ramp_period_ms),
            cycle: PollTimer::new(config.cycle_period_ms),
            roll: PollTimer::new(config.roll_period_ms),
            fade: None,
            ramp_target: config.day_brightness,
        }
    }

    /// Arm the upward ramp toward `target`, disarming any downward ramp.
    pub fn start_ramp_up(&mut self, now: u64, target: u8) {
        self.ramp_down.stop();
        self.ramp_target = target;
        self.ramp_up.start(now);
    }

    /// Arm the downward ramp toward zero, disarming any upward ramp.
    pub fn start_ramp_down(&mut self, now: u64) {
        self.ramp_up.stop();
        self.ramp_down.start(now);
    }

    /// Arm the depolarization cycle.
    pub fn start_cycle(&mut self, now: u64) {
        self.cycle.start(now);
    }

    /// Disarm the depolarization cycle. A fade already in flight finishes.
    pub fn stop_cycle(&mut self) {
        self.cycle.stop();
    }

    /// Arm the roll animation.
    pub fn start_roll(&mut self, now: u64) {
        self.roll.start(now);
    }

    /// Disarm the roll animation. A fade already in flight finishes.
    pub fn stop_roll(&mut self) {
        self.roll.stop();
    }

    pub fn is_ramp_up_running(&self) -> bool {
        self.ramp_up.is_running()
    }

    pub fn is_ramp_down_running(&self) -> bool {
        self.ramp_down.is_running()
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp_up.is_running() || self.ramp_down.is_running()
    }

    pub fn is_cycle_running(&self) -> bool {
        self.cycle.is_running()
    }

    pub fn is_roll_running(&self) -> bool {
        self.roll.is_running()
    }

    /// Whether a cross-fade currently owns the display.
    pub fn fade_in_flight(&self) -> bool {
        self.fade.is_some()
    }

    /// Begin a cross-fade unless one is already in flight. Returns whether
    /// the fade was accepted.
    pub fn begin_fade<D, P>(
        &mut self,
        to: DisplayFrame,
        duration_ms: u32,
        now: u64,
        display: &D,
        power: &P,
    ) -> bool
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        if self.fade.is_some() {
            return false;
        }
        self.fade = Some(CrossFade::begin(to, duration_ms, now, display, power));
        true
    }

    /// Drop an in-flight fade without completing it. The display keeps
    /// whatever half-step frame it last latched; update-lifecycle use only.
    pub fn cancel_fade(&mut self) {
        self.fade = None;
    }

    /// Disarm every effect at once. The display is not touched.
    pub fn stop_all(&mut self) {
        self.ramp_up.stop();
        self.ramp_down.stop();
        self.cycle.stop();
        self.roll.stop();
    }

    /// Poll every armed effect once.
    pub fn tick<D, P>(
        &mut self,
        now: u64,
        display: &mut D,
        power: &mut P,
        config: &ClockConfig,
    ) -> TickOutcome
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        let mut outcome = TickOutcome::default();

        // An in-flight fade owns the bus and the brightness level; nothing
        // else runs until it completes.
        if let Some(fade) = self.fade.as_mut() {
            if fade.poll(now, display, power) {
                self.fade = None;
            }
            return outcome;
        }

        if self.ramp_down.poll(now) {
            let level = power.brightness().saturating_sub(1);
            power.set_brightness(level);
            if level == 0 {
                self.ramp_down.stop();
                outcome.ramp_down_done = true;
            }
        }

        if self.ramp_up.poll(now) {
            let current = power.brightness();
            if current >= self.ramp_target {
                // Already at or past the target; nothing to raise.
                self.ramp_up.stop();
                outcome.ramp_up_done = true;
            } else {
                let level = current + 1;
                power.set_brightness(level);
                if level >= self.ramp_target {
                    self.ramp_up.stop();
                    outcome.ramp_up_done = true;
                }
            }
        }

        // Digit-advance fade, held back while a ramp owns the level.
        if self.cycle.poll(now) && !self.is_ramping() && self.fade.is_none() {
            let to = display.current_frame().incremented();
            self.fade = Some(CrossFade::begin(to, config.cycle_fade_ms, now, display, power));
        }

        if self.roll.poll(now) && self.fade.is_none() {
            let to = display.current_frame().rotated_right();
            self.fade = Some(CrossFade::begin(to, config.fade_ms, now, display, power));
        }

        outcome
    }
}
