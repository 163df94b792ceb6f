//! Engine control task
//!
//! Owns the display bus, the anode supply and the clock engine. Selects
//! over the tick heartbeat, the command stream, wall-clock syncs and
//! update lifecycle notifications; everything the engine reports is
//! logged (and, for restarts, executed) here.

use cortex_m::peripheral::SCB;
use defmt::*;
use embassy_futures::select::{select4, Either4};
use embassy_rp::gpio::Output;
use embassy_time::Instant;

use horologion_core::config::ClockConfig;
use horologion_core::engine::ClockEngine;
use horologion_core::event::EngineEvent;

use horologion_drivers::{AnodeSupply, ShiftRegisterBus};

use crate::channels::{UpdateEvent, COMMAND_CHANNEL, TIME_SYNC, UPDATE_EVENT};
use crate::pins::{AnodePwm, RpOutput};
use crate::tasks::tick::TICK_SIGNAL;
use crate::wall_clock::WallClock;

/// Concrete bus type for this board
pub type Bus = ShiftRegisterBus<RpOutput, RpOutput, RpOutput>;

/// Concrete supply type for this board
pub type Supply = AnodeSupply<RpOutput, AnodePwm>;

/// Engine task - the single writer of all display and power state
#[embassy_executor::task]
pub async fn engine_task(mut bus: Bus, mut supply: Supply, mut led: Output<'static>) {
    info!("Engine task started");

    let mut wall_clock = WallClock::new();
    let mut engine = ClockEngine::new(ClockConfig::default());

    loop {
        match select4(
            TICK_SIGNAL.wait(),
            COMMAND_CHANNEL.receive(),
            TIME_SYNC.wait(),
            UPDATE_EVENT.wait(),
        )
        .await
        {
            Either4::First(now) => {
                let events = engine.tick(now, wall_clock.now(), &mut bus, &mut supply);
                dispatch(&events);
            }
            Either4::Second(command) => {
                let events = engine.handle_command(
                    command,
                    uptime_ms(),
                    wall_clock.now(),
                    &mut bus,
                    &mut supply,
                );
                dispatch(&events);
            }
            Either4::Third(sync) => {
                let first = !wall_clock.is_synced();
                if wall_clock.sync(sync.hour, sync.minute, sync.second) {
                    info!(
                        "Time sync: {:02}:{:02}:{:02}",
                        sync.hour, sync.minute, sync.second
                    );
                    if first {
                        // First fix: light the tubes and show the time.
                        engine.boot(wall_clock.now(), &mut bus, &mut supply);
                        led.set_low();
                        info!("First time fix, display running");
                    }
                } else {
                    warn!("Rejected out-of-range time sync");
                }
            }
            Either4::Fourth(update) => handle_update(update, &mut engine, &mut supply),
        }
    }
}

fn uptime_ms() -> u64 {
    Instant::now().as_millis()
}

/// Log engine events and carry out the ones that need the platform.
fn dispatch(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::TimeShown { hour, minute } => {
                info!("Time changed to {:02}:{:02}", hour, minute);
            }
            EngineEvent::PowerDownStarted => info!("Powering down tubes for the night..."),
            EngineEvent::PoweredDown => info!("Tubes fully powered down"),
            EngineEvent::PowerUpStarted => info!("Powering up tubes for the day"),
            EngineEvent::PoweredUp => info!("Tubes at day brightness"),
            EngineEvent::CycleStarted => info!("Cathode depolarization cycle started"),
            EngineEvent::CycleStopped => info!("Cathode depolarization cycle stopped"),
            EngineEvent::RollStarted => info!("Roll animation started"),
            EngineEvent::RollStopped => info!("Roll animation stopped"),
            EngineEvent::RestartRequested => {
                info!("Restart requested, rebooting");
                SCB::sys_reset();
            }
        }
    }
}

fn handle_update(update: UpdateEvent, engine: &mut ClockEngine, supply: &mut Supply) {
    match update {
        UpdateEvent::Started => {
            // The transfer must never run with high voltage up or a fade
            // holding the bus.
            engine.prepare_for_update(supply);
            info!("Update starting, display released");
        }
        UpdateEvent::Finished => info!("Update finished"),
        UpdateEvent::Failed => warn!("Update failed"),
    }
}
