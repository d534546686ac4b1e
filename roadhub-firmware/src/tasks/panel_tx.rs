//! Panel UART transmit task
//!
//! Sends pages, status bar updates and heartbeat responses to the panel.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use roadhub_protocol::frame::MAX_FRAME_SIZE;
use roadhub_protocol::Frame;

use crate::channels::{HEARTBEAT_RECEIVED, PAGE_UPDATE, STATUS_UPDATE};
use crate::display::{protocol, Page};

/// Shared page buffer protected by mutex
pub static PAGE_BUFFER: Mutex<CriticalSectionRawMutex, Page> = Mutex::new(Page::new());

/// Panel TX task - sends frames to the panel
#[embassy_executor::task]
pub async fn panel_tx_task(mut tx: BufferedUartTx) {
    info!("Panel TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(50));

    loop {
        if HEARTBEAT_RECEIVED.signaled() {
            HEARTBEAT_RECEIVED.reset();
            if let Ok(frame) = protocol::pong_frame() {
                if send_frame(&mut tx, &frame).await {
                    trace!("PONG sent");
                }
            }
        }

        if PAGE_UPDATE.signaled() {
            PAGE_UPDATE.reset();
            send_page(&mut tx).await;
        }

        if let Some(status) = STATUS_UPDATE.try_take() {
            match protocol::status_frame(status) {
                Ok(frame) => {
                    send_frame(&mut tx, &frame).await;
                }
                Err(e) => warn!("Failed to encode status: {:?}", e),
            }
        }

        ticker.next().await;
    }
}

/// Encode and write one frame; returns false on failure
async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) -> bool {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    let len = match frame.encode(&mut buf) {
        Ok(len) => len,
        Err(e) => {
            warn!("Failed to encode panel frame: {:?}", e);
            return false;
        }
    };

    if let Err(e) = tx.write_all(&buf[..len]).await {
        warn!("Failed to send panel frame: {:?}", e);
        return false;
    }
    true
}

/// Send the current page to the panel
async fn send_page(tx: &mut BufferedUartTx) {
    // Held for the whole page so the panel never sees a half-updated one
    let page = PAGE_BUFFER.lock().await;

    for frame in protocol::encode_page(&page) {
        if !send_frame(tx, &frame).await {
            break;
        }
    }

    trace!("Page sent");
}
