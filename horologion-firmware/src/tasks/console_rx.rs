//! Console receive task
//!
//! Reads lines from the co-processor UART: wall-clock syncs, update
//! lifecycle notifications, and the user command set. Unknown input is
//! answered with the help text by the transmit side.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use horologion_core::command::Command;

use crate::channels::{TimeSync, UpdateEvent, COMMAND_CHANNEL, HELP_REQUESTED, TIME_SYNC, UPDATE_EVENT};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Longest accepted console line
const MAX_LINE: usize = 64;

/// Console RX task - accumulates lines and dispatches them
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];
    let mut line: heapless::Vec<u8, MAX_LINE> = heapless::Vec::new();

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match byte {
                        b'\n' | b'\r' => {
                            if !line.is_empty() {
                                handle_line(core::str::from_utf8(&line).unwrap_or("")).await;
                                line.clear();
                            }
                        }
                        _ => {
                            if line.push(byte).is_err() {
                                warn!("Console line too long, dropping");
                                line.clear();
                            }
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Dispatch one console line.
async fn handle_line(line: &str) {
    let line = line.trim();

    // Co-processor glue first: time syncs and the update lifecycle.
    if let Some(rest) = line.strip_prefix("time set ") {
        match parse_time(rest) {
            Some(sync) => TIME_SYNC.signal(sync),
            None => warn!("Bad time sync: {}", line),
        }
        return;
    }
    match line {
        "update start" => {
            UPDATE_EVENT.signal(UpdateEvent::Started);
            return;
        }
        "update end" => {
            UPDATE_EVENT.signal(UpdateEvent::Finished);
            return;
        }
        "update error" => {
            UPDATE_EVENT.signal(UpdateEvent::Failed);
            return;
        }
        _ => {}
    }

    match Command::parse(line) {
        Some(command) => {
            debug!("Command: {:?}", command);
            COMMAND_CHANNEL.send(command).await;
        }
        None => {
            info!("Command not recognized: {}", line);
            HELP_REQUESTED.signal(());
        }
    }
}

/// Parse "HH:MM" or "HH:MM:SS".
fn parse_time(text: &str) -> Option<TimeSync> {
    let mut parts = text.trim().split(':');
    let hour = parts.next()?.parse::<u8>().ok()?;
    let minute = parts.next()?.parse::<u8>().ok()?;
    let second = match parts.next() {
        Some(s) => s.parse::<u8>().ok()?,
        None => 0,
    };
    if parts.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some(TimeSync {
        hour,
        minute,
        second,
    })
}
