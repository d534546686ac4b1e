//! Panel UART receive task
//!
//! Receives frames from the panel and dispatches touch samples and
//! heartbeats.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use roadhub_protocol::{FrameParser, PanelCommand};

use crate::channels::{HEARTBEAT_RECEIVED, PANEL_SEEN, TOUCH_CHANNEL};
use crate::tasks::tick::now_ms;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Panel RX task - receives and parses frames from the panel
#[embassy_executor::task]
pub async fn panel_rx_task(mut rx: BufferedUartRx) {
    info!("Panel RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("Panel RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match PanelCommand::from_frame(&frame) {
                            Ok(cmd) => handle_panel_command(cmd),
                            Err(e) => {
                                warn!("Failed to parse panel command: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Panel frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Panel UART read error: {:?}", e);
            }
        }
    }
}

/// Handle a parsed panel command
fn handle_panel_command(cmd: PanelCommand) {
    match cmd {
        PanelCommand::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
            PANEL_SEEN.signal(());
        }
        PanelCommand::Touch(report) => {
            let sample = report.at(now_ms());
            trace!("Touch: {:?}", sample);
            // Drop rather than stall the UART when the controller lags
            if TOUCH_CHANNEL.try_send(sample).is_err() {
                warn!("Touch channel full, dropping sample");
            }
        }
    }
}
