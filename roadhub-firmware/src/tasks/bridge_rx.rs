//! Bridge UART receive task
//!
//! Receives frames from the network bridge. Network status is published
//! directly; session events are queued for the link manager. Text frames
//! are dropped when the queue is full, lifecycle events never are.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;
use portable_atomic::Ordering;

use roadhub_protocol::{BridgeEvent, FrameParser};

use crate::bridge::is_lifecycle;
use crate::channels::{BRIDGE_EVENTS, NETWORK_UP};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Bridge RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn bridge_rx_task(mut rx: BufferedUartRx) {
    info!("Bridge RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match BridgeEvent::from_frame(&frame) {
                            Ok(event) => handle_bridge_event(event).await,
                            Err(e) => {
                                warn!("Failed to parse bridge event: {:?}", e);
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Bridge frame error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Bridge UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_bridge_event(event: BridgeEvent) {
    match event {
        BridgeEvent::Network(up) => {
            let was_up = NETWORK_UP.swap(up, Ordering::Relaxed);
            if was_up != up {
                info!("Bridge network {}", if up { "up" } else { "down" });
            }
        }
        BridgeEvent::Transport(event) => {
            debug!("Bridge event: {:?}", event);
            if is_lifecycle(&event) {
                // Session state must reach the link manager; wait for room
                BRIDGE_EVENTS.send(event).await;
            } else if BRIDGE_EVENTS.try_send(event).is_err() {
                warn!("Bridge event channel full, dropping text frame");
            }
        }
    }
}
