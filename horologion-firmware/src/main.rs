//! Horologion - Nixie Tube Clock Firmware
//!
//! Main firmware binary for RP2040-based nixie clock boards: four tubes
//! behind two daisy-chained shift registers, an anode PWM line and a
//! high-voltage converter enable. A WiFi co-processor on UART0 supplies
//! wall-clock syncs and console commands and drives firmware updates;
//! this binary owns the display and the power rail.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use horologion_drivers::{AnodeSupply, ShiftRegisterBus};

use crate::pins::{AnodePwm, RpOutput, PWM_TOP};

mod channels;
mod pins;
mod tasks;
mod wall_clock;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Horologion firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Status LED: lit until the first time fix reaches the engine.
    let led = Output::new(p.PIN_25, Level::High);

    // Shift-register bus pins (board wiring: data GP2, clock GP3, latch GP4)
    let data = RpOutput::new(Output::new(p.PIN_2, Level::Low));
    let clock = RpOutput::new(Output::new(p.PIN_3, Level::Low));
    let latch = RpOutput::new(Output::new(p.PIN_4, Level::High));
    let bus = ShiftRegisterBus::new(latch, clock, data);

    // High-voltage enable (GP5) and anode PWM (GP6, PWM slice 3 channel A)
    let hv_enable = RpOutput::new(Output::new(p.PIN_5, Level::Low));
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;
    let anode_pwm = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm_config.clone());
    let supply = AnodeSupply::new(hv_enable, AnodePwm::new(anode_pwm, pwm_config));

    info!("Display bus and anode supply initialized");

    // UART0 to the WiFi co-processor (time syncs, console, update control)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for co-processor link");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(tx)).unwrap();
    spawner.spawn(tasks::engine_task(bus, supply, led)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks.
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
