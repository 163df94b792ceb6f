//! Console transmit task
//!
//! Writes the help text back over the co-processor link whenever the
//! receive side sees input it cannot parse.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use horologion_core::command::HELP;

use crate::channels::HELP_REQUESTED;

/// Console TX task - answers unrecognized input with the help text
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx) {
    info!("Console TX task started");

    loop {
        HELP_REQUESTED.wait().await;
        if let Err(e) = tx.write_all(HELP.as_bytes()).await {
            warn!("Failed to send help text: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("Failed to send help text: {:?}", e);
        }
    }
}
