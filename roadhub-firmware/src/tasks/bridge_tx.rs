//! Bridge UART transmit task
//!
//! Forwards join, connect and send requests to the network bridge.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use roadhub_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::BRIDGE_REQUESTS;

/// Bridge TX task - writes queued requests to the bridge
#[embassy_executor::task]
pub async fn bridge_tx_task(mut tx: BufferedUartTx) {
    info!("Bridge TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let request = BRIDGE_REQUESTS.receive().await;
        debug!("Bridge request: {}", request.kind());

        let frame = match request.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to encode {} request: {:?}", request.kind(), e);
                continue;
            }
        };

        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("Failed to send {} request: {:?}", request.kind(), e);
                }
            }
            Err(e) => warn!("Failed to encode {} request: {:?}", request.kind(), e),
        }
    }
}
