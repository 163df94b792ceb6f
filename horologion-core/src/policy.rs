//! Daily policy
//!
//! Maps the wall clock onto engine actions: tubes off at night, on by day,
//! the depolarization window after day start, and the ordinary
//! minute-change display refresh. This module decides *when* effects run;
//! the scheduler only executes them.

use crate::config::ClockConfig;
use crate::effects::Effects;
use crate::event::{EngineEvent, Events};
use crate::frame::DisplayFrame;
use crate::traits::{AnodePower, TubeDisplay};

/// A wall-clock reading from the external time collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
}

/// Policy state carried across ticks.
#[derive(Debug, Default)]
pub struct DailyPolicy {
    /// Minute currently on the tubes, if the clock path put it there
    last_minute: Option<u8>,
    /// The running depolarization cycle was started by this policy and
    /// may be stopped by it; command-started cycles are stopped only by
    /// command
    cycle_owned: bool,
}

impl DailyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `minute` is already on the tubes (boot path).
    pub fn note_shown(&mut self, minute: u8) {
        self.last_minute = Some(minute);
    }

    /// A command took over the depolarization cycle; the policy keeps its
    /// hands off it from now on.
    pub fn release_cycle(&mut self) {
        self.cycle_owned = false;
    }

    /// Run every rule once for this tick.
    #[allow(clippy::too_many_arguments)]
    pub fn apply<D, P>(
        &mut self,
        time: WallTime,
        now: u64,
        config: &ClockConfig,
        effects: &mut Effects,
        display: &mut D,
        power: &mut P,
        events: &mut Events,
    ) where
        D: TubeDisplay,
        P: AnodePower,
    {
        self.refresh_display(time, now, config, effects, display, power, events);
        self.apply_power_rules(time, now, config, effects, power, events);
        self.apply_cycle_window(time, now, config, effects, events);
    }

    /// Forget the displayed minute and run the refresh path immediately
    /// (the `time` command).
    #[allow(clippy::too_many_arguments)]
    pub fn force_refresh<D, P>(
        &mut self,
        time: WallTime,
        now: u64,
        config: &ClockConfig,
        effects: &mut Effects,
        display: &mut D,
        power: &mut P,
        events: &mut Events,
    ) where
        D: TubeDisplay,
        P: AnodePower,
    {
        self.last_minute = None;
        self.refresh_display(time, now, config, effects, display, power, events);
    }

    /// Ordinary clock path: when the minute changes and the display is not
    /// owned by the depolarization cycle or an in-flight fade, show the
    /// new time. Digits are written regardless of the power rail state;
    /// dark tubes just get a plain latch instead of a fade.
    #[allow(clippy::too_many_arguments)]
    fn refresh_display<D, P>(
        &mut self,
        time: WallTime,
        now: u64,
        config: &ClockConfig,
        effects: &mut Effects,
        display: &mut D,
        power: &mut P,
        events: &mut Events,
    ) where
        D: TubeDisplay,
        P: AnodePower,
    {
        if self.last_minute == Some(time.minute) {
            return;
        }
        if effects.is_cycle_running() || effects.fade_in_flight() {
            // Display busy; retry on a later tick.
            return;
        }
        let Ok(frame) = DisplayFrame::from_time(time.hour, time.minute) else {
            return;
        };
        if power.brightness() == 0 || !power.is_hv_on() {
            display.write_frame(frame);
        } else {
            effects.begin_fade(frame, config.fade_ms, now, display, power);
        }
        self.last_minute = Some(time.minute);
        let _ = events.push(EngineEvent::TimeShown {
            hour: time.hour,
            minute: time.minute,
        });
    }

    fn apply_power_rules<P>(
        &mut self,
        time: WallTime,
        now: u64,
        config: &ClockConfig,
        effects: &mut Effects,
        power: &mut P,
        events: &mut Events,
    ) where
        P: AnodePower,
    {
        // Exact midnight gets its own trigger so the day boundary is never
        // missed even if the night rule below is reconfigured.
        if time.hour == 0 && time.minute == 0 {
            Self::arm_ramp_down(now, effects, power, events);
        }

        if time.hour < config.day_start_hour {
            // Night: bring the level down to zero; the engine drops the
            // high voltage once the ramp reports completion.
            Self::arm_ramp_down(now, effects, power, events);
        } else if power.brightness() == 0 && !effects.is_ramp_up_running() {
            // Day with dark tubes: light the converter and ramp up.
            power.set_hv(true);
            effects.start_ramp_up(now, config.day_brightness);
            let _ = events.push(EngineEvent::PowerUpStarted);
        }
    }

    fn arm_ramp_down<P>(now: u64, effects: &mut Effects, power: &mut P, events: &mut Events)
    where
        P: AnodePower,
    {
        if power.brightness() > 0 && !effects.is_ramp_down_running() {
            effects.start_ramp_down(now);
            let _ = events.push(EngineEvent::PowerDownStarted);
        }
    }

    /// The depolarization window: the first `cycle_window_min` minutes of
    /// the day, starting at day start sharp.
    fn apply_cycle_window(
        &mut self,
        time: WallTime,
        now: u64,
        config: &ClockConfig,
        effects: &mut Effects,
        events: &mut Events,
    ) {
        let in_window =
            time.hour == config.day_start_hour && time.minute < config.cycle_window_min;

        if in_window {
            if !effects.is_cycle_running() {
                effects.start_cycle(now);
                self.cycle_owned = true;
                let _ = events.push(EngineEvent::CycleStarted);
            }
        } else if self.cycle_owned {
            if effects.is_cycle_running() {
                effects.stop_cycle();
                let _ = events.push(EngineEvent::CycleStopped);
            }
            self.cycle_owned = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDisplay, MockPower};

    fn frame(digits: [u8; 4]) -> DisplayFrame {
        DisplayFrame::new(digits).unwrap()
    }

    struct Fixture {
        policy: DailyPolicy,
        config: ClockConfig,
        effects: Effects,
        display: MockDisplay,
        power: MockPower,
    }

    impl Fixture {
        fn new() -> Self {
            let config = ClockConfig::default();
            let effects = Effects::new(&config);
            Self {
                policy: DailyPolicy::new(),
                config,
                effects,
                display: MockDisplay::new(),
                power: MockPower::new(),
            }
        }

        fn apply(&mut self, hour: u8, minute: u8, now: u64) -> Events {
            let mut events = Events::new();
            self.policy.apply(
                WallTime { hour, minute },
                now,
                &self.config,
                &mut self.effects,
                &mut self.display,
                &mut self.power,
                &mut events,
            );
            events
        }
    }

    #[test]
    fn minute_change_latches_plainly_when_dark() {
        let mut fx = Fixture::new();
        let events = fx.apply(10, 15, 0);

        assert_eq!(fx.display.current_frame(), frame([1, 0, 1, 5]));
        assert!(events.contains(&EngineEvent::TimeShown {
            hour: 10,
            minute: 15
        }));
        // Dark tubes: a plain latch, no fade.
        assert!(!fx.effects.fade_in_flight());
    }

    #[test]
    fn minute_change_fades_when_lit() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.apply(10, 15, 0);
        // Fade accepted, not yet latched.
        assert!(fx.effects.fade_in_flight());
    }

    #[test]
    fn unchanged_minute_is_not_redisplayed() {
        let mut fx = Fixture::new();
        fx.apply(10, 15, 0);
        let writes = fx.display.writes.len();
        fx.apply(10, 15, 1000);
        assert_eq!(fx.display.writes.len(), writes);
    }

    #[test]
    fn minute_change_defers_to_running_cycle() {
        let mut fx = Fixture::new();
        fx.effects.start_cycle(0);
        fx.apply(10, 15, 0);
        assert!(fx.display.writes.is_empty());

        // Once the cycle stops, the pending minute goes out.
        fx.effects.stop_cycle();
        fx.apply(10, 15, 10);
        assert_eq!(fx.display.current_frame(), frame([1, 0, 1, 5]));
    }

    #[test]
    fn night_arms_ramp_down_once() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);

        let events = fx.apply(2, 30, 0);
        assert!(fx.effects.is_ramp_down_running());
        assert!(events.contains(&EngineEvent::PowerDownStarted));

        // Still running: no re-arm on the next tick.
        let events = fx.apply(2, 30, 10);
        assert!(!events.contains(&EngineEvent::PowerDownStarted));
    }

    #[test]
    fn midnight_boundary_arms_ramp_down() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.policy.note_shown(0);

        let events = fx.apply(0, 0, 0);
        assert!(fx.effects.is_ramp_down_running());
        assert!(events.contains(&EngineEvent::PowerDownStarted));
    }

    #[test]
    fn day_relights_dark_tubes_with_a_ramp() {
        let mut fx = Fixture::new();
        fx.policy.note_shown(30);

        let events = fx.apply(9, 30, 0);
        assert!(fx.power.is_hv_on());
        assert!(fx.effects.is_ramp_up_running());
        assert!(events.contains(&EngineEvent::PowerUpStarted));
    }

    #[test]
    fn day_leaves_lit_tubes_alone() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.policy.note_shown(30);

        let events = fx.apply(9, 30, 0);
        assert!(!fx.effects.is_ramping());
        assert!(events.is_empty());
    }

    #[test]
    fn cycle_window_opens_at_day_start_sharp() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.policy.note_shown(0);

        let events = fx.apply(8, 0, 0);
        assert!(fx.effects.is_cycle_running());
        assert!(events.contains(&EngineEvent::CycleStarted));
    }

    #[test]
    fn cycle_window_closes_after_configured_minutes() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.policy.note_shown(0);
        fx.apply(8, 0, 0);
        assert!(fx.effects.is_cycle_running());

        let window = fx.config.cycle_window_min;
        let events = fx.apply(8, window, 60_000);
        assert!(!fx.effects.is_cycle_running());
        assert!(events.contains(&EngineEvent::CycleStopped));
    }

    #[test]
    fn policy_never_stops_a_command_started_cycle() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.policy.note_shown(30);

        // Command path: cycle started outside the window, ownership released.
        fx.effects.start_cycle(0);
        fx.policy.release_cycle();

        fx.apply(14, 30, 1000);
        assert!(fx.effects.is_cycle_running());
    }

    #[test]
    fn hv_off_minute_change_still_writes_digits() {
        let mut fx = Fixture::new();
        fx.power = MockPower::lit(127);
        fx.power.set_hv(false);
        fx.power.level_writes.clear();

        fx.apply(10, 16, 0);
        // Digits latched plainly; brightness and HV untouched.
        assert_eq!(fx.display.current_frame(), frame([1, 0, 1, 6]));
        assert!(!fx.power.is_hv_on());
        assert!(fx.power.level_writes.is_empty());
    }
}
