//! Main controller task
//!
//! Owns the [`Hub`]. Applies touch samples, ticks the link and notification
//! timers, and hands finished pages to the panel TX task.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Timer;

use roadhub_core::config::HubConfig;
use roadhub_core::link::{LinkNote, LinkReport};
use roadhub_core::Hub;
use roadhub_protocol::TouchSample;

use crate::bridge::{BridgeNetwork, BridgeSession};
use crate::channels::{PAGE_UPDATE, PANEL_SEEN, STATUS_UPDATE, TOUCH_CHANNEL};
use crate::display::PanelRenderer;
use crate::tasks::panel_tx::PAGE_BUFFER;
use crate::tasks::tick::{now_ms, TICK_SIGNAL};

/// Heartbeat gap after which the panel is assumed to have restarted
const PANEL_SILENCE_MS: u32 = 3_000;

/// Panel liveness poll interval
const PANEL_POLL_MS: u64 = 250;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: HubConfig, seed: u64) {
    info!("Controller task started");

    let mut renderer = PanelRenderer::new(&config);
    let mut hub = Hub::new(config, seed, now_ms());
    let mut network = BridgeNetwork;
    let mut session = BridgeSession;
    let mut panel_seen_ms: Option<u32> = None;

    publish(&mut hub, &mut renderer).await;

    loop {
        match select3(
            TOUCH_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
            Timer::after_millis(PANEL_POLL_MS),
        )
        .await
        {
            Either3::First(sample) => {
                apply_touch(&mut hub, sample);
                // Drain whatever else queued up before drawing
                while let Ok(sample) = TOUCH_CHANNEL.try_receive() {
                    apply_touch(&mut hub, sample);
                }
                publish(&mut hub, &mut renderer).await;
            }

            Either3::Second(now) => {
                let report = hub.tick(now, &mut network, &mut session);
                log_report(&report);
                publish(&mut hub, &mut renderer).await;
            }

            Either3::Third(_) => {
                if PANEL_SEEN.signaled() {
                    PANEL_SEEN.reset();
                    let now = now_ms();
                    let restarted = panel_seen_ms
                        .map_or(true, |seen| now.wrapping_sub(seen) > PANEL_SILENCE_MS);
                    panel_seen_ms = Some(now);

                    if restarted {
                        info!("Panel link up, repainting");
                        hub.invalidate();
                        publish(&mut hub, &mut renderer).await;
                    }
                }
            }
        }
    }
}

fn apply_touch(hub: &mut Hub, sample: TouchSample) {
    if let Some(transition) = hub.handle_touch(sample) {
        if transition.changed {
            debug!("Screen: {:?}", transition.screen);
        }
    }
}

/// Render and hand the result to the panel TX task
async fn publish(hub: &mut Hub, renderer: &mut PanelRenderer) {
    let drawn = match hub.render(renderer, now_ms()) {
        Ok(drawn) => drawn,
        Err(never) => match never {},
    };
    if !drawn {
        return;
    }

    if renderer.take_page_changed() {
        let mut buffer = PAGE_BUFFER.lock().await;
        buffer.clone_from(renderer.page());
        PAGE_UPDATE.signal(());
    }

    if let Some(status) = renderer.take_status() {
        STATUS_UPDATE.signal(status);
    }
}

/// Log what the link manager did during a tick
fn log_report(report: &LinkReport) {
    for note in report.notes() {
        match note {
            LinkNote::FrameMerged | LinkNote::Simulated | LinkNote::MetricsRequested => {
                debug!("Link: {:?}", note);
            }
            LinkNote::FrameIgnored => trace!("Link: {:?}", note),
            LinkNote::JoinFailed { .. }
            | LinkNote::ConnectFailed(_)
            | LinkNote::FrameOutOfSession
            | LinkNote::FrameDropped(_)
            | LinkNote::SendFailed(_) => warn!("Link: {:?}", note),
            _ => info!("Link: {:?}", note),
        }
    }
}
