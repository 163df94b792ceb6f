//! The engine façade
//!
//! One [`ClockEngine`] owns every piece of mutable display/power state and
//! is driven by the control loop: ticks carrying the current wall time, a
//! command stream, and the update-lifecycle hook. Hardware comes in by
//! reference through the seam traits; no call here ever blocks.

use crate::command::Command;
use crate::config::ClockConfig;
use crate::effects::Effects;
use crate::event::{EngineEvent, Events};
use crate::frame::{DisplayFrame, FrameError};
use crate::policy::{DailyPolicy, WallTime};
use crate::power::PowerState;
use crate::traits::{AnodePower, TubeDisplay};

/// The display & power state engine.
pub struct ClockEngine {
    config: ClockConfig,
    effects: Effects,
    policy: DailyPolicy,
    power_state: PowerState,
}

impl ClockEngine {
    pub fn new(config: ClockConfig) -> Self {
        let effects = Effects::new(&config);
        Self {
            config,
            effects,
            policy: DailyPolicy::new(),
            power_state: PowerState::Off,
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn power_state(&self) -> PowerState {
        self.power_state
    }

    /// Read access to the effect scheduler (state queries only).
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// First light: latch the current time if it is already known, set the
    /// day level and assert high voltage. If this happens at night the
    /// daily policy corrects the state within one tick.
    pub fn boot<D, P>(&mut self, time: Option<WallTime>, display: &mut D, power: &mut P)
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        if let Some(t) = time {
            if let Ok(frame) = DisplayFrame::from_time(t.hour, t.minute) {
                display.write_frame(frame);
                self.policy.note_shown(t.minute);
            }
        }
        power.set_brightness(self.config.day_brightness);
        power.set_hv(true);
        self.power_state = PowerState::On;
    }

    /// One control-loop tick: policy first, then every armed effect.
    pub fn tick<D, P>(
        &mut self,
        now: u64,
        time: Option<WallTime>,
        display: &mut D,
        power: &mut P,
    ) -> Events
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        let mut events = Events::new();

        if let Some(t) = time {
            self.policy.apply(
                t,
                now,
                &self.config,
                &mut self.effects,
                display,
                power,
                &mut events,
            );
        }
        for event in events.iter() {
            match event {
                EngineEvent::PowerUpStarted => self.power_state = PowerState::RampingUp,
                EngineEvent::PowerDownStarted => self.power_state = PowerState::RampingDown,
                _ => {}
            }
        }

        let outcome = self.effects.tick(now, display, power, &self.config);
        if outcome.ramp_down_done {
            power.set_hv(false);
            self.power_state = PowerState::Off;
            let _ = events.push(EngineEvent::PoweredDown);
        }
        if outcome.ramp_up_done {
            self.power_state = PowerState::On;
            let _ = events.push(EngineEvent::PoweredUp);
        }

        events
    }

    /// Apply one command intent.
    pub fn handle_command<D, P>(
        &mut self,
        command: Command,
        now: u64,
        time: Option<WallTime>,
        display: &mut D,
        power: &mut P,
    ) -> Events
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        let mut events = Events::new();
        match command {
            Command::HvOn => power.set_hv(true),
            Command::HvOff => power.set_hv(false),
            Command::Brightness(level) => {
                power.set_brightness(level);
                self.power_state = if level == 0 {
                    PowerState::Off
                } else {
                    PowerState::On
                };
            }
            Command::ShowTime => {
                if let Some(t) = time {
                    self.policy.force_refresh(
                        t,
                        now,
                        &self.config,
                        &mut self.effects,
                        display,
                        power,
                        &mut events,
                    );
                }
            }
            Command::CycleStart => {
                self.effects.start_cycle(now);
                self.policy.release_cycle();
                let _ = events.push(EngineEvent::CycleStarted);
            }
            Command::CycleStop => {
                self.effects.stop_cycle();
                self.policy.release_cycle();
                let _ = events.push(EngineEvent::CycleStopped);
            }
            Command::RollStart => {
                self.effects.start_roll(now);
                let _ = events.push(EngineEvent::RollStarted);
            }
            Command::RollStop => {
                self.effects.stop_roll();
                let _ = events.push(EngineEvent::RollStopped);
            }
            Command::PowerUp => {
                power.set_hv(true);
                self.effects.start_ramp_up(now, self.config.day_brightness);
                self.power_state = PowerState::RampingUp;
                let _ = events.push(EngineEvent::PowerUpStarted);
            }
            Command::PowerDown => {
                self.effects.start_ramp_down(now);
                self.power_state = PowerState::RampingDown;
                let _ = events.push(EngineEvent::PowerDownStarted);
            }
            Command::Restart => {
                let _ = events.push(EngineEvent::RestartRequested);
            }
        }
        events
    }

    /// Show an arbitrary 0-9999 number (diagnostics surface). Skipped
    /// silently when a fade already owns the display.
    pub fn show_number<D, P>(
        &mut self,
        number: u16,
        now: u64,
        display: &mut D,
        power: &mut P,
    ) -> Result<(), FrameError>
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        let frame = DisplayFrame::from_number(number)?;
        if self.effects.fade_in_flight() {
            return Ok(());
        }
        if power.brightness() == 0 || !power.is_hv_on() {
            display.write_frame(frame);
        } else {
            self.effects
                .begin_fade(frame, self.config.fade_ms, now, display, power);
        }
        Ok(())
    }

    /// Update-lifecycle on-start hook: kill the high voltage and release
    /// the display before the transfer begins.
    pub fn prepare_for_update<P>(&mut self, power: &mut P)
    where
        P: AnodePower,
    {
        power.set_hv(false);
        self.effects.cancel_fade();
        self.effects.stop_all();
        self.power_state = PowerState::Off;
    }
}
