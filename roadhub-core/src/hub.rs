//! Top-level hub context
//!
//! One [`Hub`] is built at startup and owns every piece of mutable state:
//! the screen machine, the gesture recognizer, the notification pool, the
//! telemetry store and the link manager. The control loop feeds it touch
//! samples, ticks it, then asks it to render, in that order.

use roadhub_protocol::TouchSample;

use crate::config::HubConfig;
use crate::gesture::GestureRecognizer;
use crate::link::{LinkManager, LinkReport, LinkState, LinkStatus};
use crate::notify::{NotificationQueue, Severity};
use crate::screen::{Screen, ScreenController, Transition};
use crate::telemetry::{TelemetrySnapshot, TelemetryStore};
use crate::traits::{NetworkInterface, Renderer, Transport};

/// Notification banners shown at once
pub const MAX_VISIBLE_NOTIFICATIONS: usize = 3;

/// Status bar content last handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StatusLine {
    status: LinkStatus,
    uptime_s: u32,
}

/// Hub context
pub struct Hub {
    screens: ScreenController,
    gestures: GestureRecognizer,
    notifications: NotificationQueue,
    telemetry: TelemetryStore,
    link: LinkManager,
    boot_ms: u32,
    drawn_status: Option<StatusLine>,
}

impl Hub {
    /// Build every component from `config`
    ///
    /// `seed` drives the telemetry simulator. Queues a boot notification.
    pub fn new(config: HubConfig, seed: u64, now_ms: u32) -> Self {
        let HubConfig {
            network,
            server,
            gesture,
            link,
            notifications,
        } = config;

        let mut notifications = NotificationQueue::new(notifications);
        notifications.push("RoadHub online", Severity::Info, now_ms);

        Self {
            screens: ScreenController::new(),
            gestures: GestureRecognizer::new(gesture),
            notifications,
            telemetry: TelemetryStore::new(seed),
            link: LinkManager::new(link, server, network, now_ms),
            boot_ms: now_ms,
            drawn_status: None,
        }
    }

    /// Feed one touch sample
    ///
    /// Returns the transition when the sample completed a gesture.
    pub fn handle_touch(&mut self, sample: TouchSample) -> Option<Transition> {
        let event = self.gestures.on_sample(sample)?;
        Some(self.screens.apply(event))
    }

    /// Expire notifications, then advance the link
    pub fn tick<N, T>(&mut self, now_ms: u32, network: &mut N, transport: &mut T) -> LinkReport
    where
        N: NetworkInterface,
        T: Transport,
    {
        self.notifications.tick(now_ms);
        self.link.poll(
            now_ms,
            network,
            transport,
            &mut self.telemetry,
            &mut self.notifications,
        )
    }

    /// Check if a page redraw is owed
    pub fn needs_redraw(&self) -> bool {
        self.screens.is_dirty() || self.telemetry.is_dirty() || self.notifications.is_dirty()
    }

    /// Bring the renderer up to date
    ///
    /// Redraws the page when any owner is dirty and repaints the status bar
    /// when the link status or the uptime second changed. Dirty flags are
    /// only cleared once the renderer accepted the page, so a failed draw is
    /// retried on the next call. Returns whether anything was drawn.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R, now_ms: u32) -> Result<bool, R::Error> {
        let mut drawn = false;

        if self.needs_redraw() {
            {
                let snapshot = self.telemetry.snapshot();
                let visible = self.notifications.active_top(MAX_VISIBLE_NOTIFICATIONS);
                renderer.redraw(self.screens.current(), &snapshot, &visible)?;
            }

            self.screens.take_dirty();
            self.telemetry.take_dirty();
            self.notifications.take_dirty();
            drawn = true;
        }

        let line = StatusLine {
            status: self.link.status(),
            uptime_s: self.uptime_s(now_ms),
        };
        if self.drawn_status != Some(line) {
            renderer.draw_status(line.status, line.uptime_s)?;
            self.drawn_status = Some(line);
            drawn = true;
        }

        Ok(drawn)
    }

    /// Force a full repaint (e.g. after the panel restarted)
    pub fn invalidate(&mut self) {
        self.screens.mark_dirty();
        self.drawn_status = None;
    }

    /// Queue a notification from outside the core
    pub fn notify(&mut self, message: &str, severity: Severity, now_ms: u32) {
        self.notifications.push(message, severity, now_ms);
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.telemetry.snapshot()
    }

    pub fn link_state(&self) -> LinkState {
        self.link.state()
    }

    pub fn link_status(&self) -> LinkStatus {
        self.link.status()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Whole seconds since the hub was built
    pub fn uptime_s(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.boot_ms) / 1000
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::String;
    use std::vec::Vec;

    use super::*;
    use crate::config::Credentials;
    use crate::notify::Notification;
    use crate::traits::TransportError;
    use roadhub_protocol::TransportEvent;

    #[derive(Default)]
    struct Offline;

    impl NetworkInterface for Offline {
        fn begin_join(&mut self, _credentials: &Credentials) {}

        fn is_joined(&self) -> bool {
            false
        }
    }

    impl Transport for Offline {
        fn connect(&mut self, _endpoint: &crate::config::Endpoint) -> Result<(), TransportError> {
            Err(TransportError::NotConnected)
        }

        fn send(&mut self, _text: &str) -> Result<(), TransportError> {
            Err(TransportError::NotConnected)
        }

        fn poll_event(&mut self) -> Option<TransportEvent> {
            None
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        pages: Vec<(Screen, Vec<String>)>,
        statuses: Vec<(LinkStatus, u32)>,
        fail: bool,
    }

    impl Renderer for RecordingRenderer {
        type Error = ();

        fn redraw(
            &mut self,
            screen: Screen,
            _telemetry: &TelemetrySnapshot,
            notifications: &[&Notification],
        ) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            let texts = notifications
                .iter()
                .map(|n| String::from(n.message.as_str()))
                .collect();
            self.pages.push((screen, texts));
            Ok(())
        }

        fn draw_status(&mut self, status: LinkStatus, uptime_s: u32) -> Result<(), ()> {
            self.statuses.push((status, uptime_s));
            Ok(())
        }
    }

    #[test]
    fn test_boot_notification_rendered() {
        let mut hub = Hub::new(HubConfig::default(), 1, 0);
        let mut renderer = RecordingRenderer::default();

        assert_eq!(hub.render(&mut renderer, 0), Ok(true));
        assert_eq!(renderer.pages.len(), 1);
        assert_eq!(renderer.pages[0].0, Screen::Home);
        assert_eq!(renderer.pages[0].1, ["RoadHub online"]);
        assert_eq!(renderer.statuses.len(), 1);

        // Nothing changed: nothing drawn
        assert_eq!(hub.render(&mut renderer, 500), Ok(false));
    }

    #[test]
    fn test_swipe_changes_screen_and_redraws() {
        let mut hub = Hub::new(HubConfig::default(), 1, 0);
        let mut renderer = RecordingRenderer::default();
        hub.render(&mut renderer, 0).unwrap();

        assert_eq!(hub.handle_touch(TouchSample::press(30, 150, 100)), None);
        let t = hub.handle_touch(TouchSample::release(200, 150, 180)).unwrap();
        assert!(t.changed);
        assert_eq!(hub.screen(), Screen::Settings);

        hub.render(&mut renderer, 200).unwrap();
        assert_eq!(renderer.pages.last().unwrap().0, Screen::Settings);
    }

    #[test]
    fn test_status_repainted_each_second() {
        let mut hub = Hub::new(HubConfig::default(), 1, 0);
        let mut renderer = RecordingRenderer::default();
        hub.render(&mut renderer, 0).unwrap();
        hub.render(&mut renderer, 999).unwrap();
        hub.render(&mut renderer, 1000).unwrap();
        assert_eq!(renderer.statuses.len(), 2);
        assert_eq!(renderer.statuses[1].1, 1);
    }

    #[test]
    fn test_failed_redraw_is_retried() {
        let mut hub = Hub::new(HubConfig::default(), 1, 0);
        let mut renderer = RecordingRenderer {
            fail: true,
            ..Default::default()
        };
        assert_eq!(hub.render(&mut renderer, 0), Err(()));
        assert!(hub.needs_redraw());

        renderer.fail = false;
        assert_eq!(hub.render(&mut renderer, 10), Ok(true));
        assert!(!hub.needs_redraw());
    }

    #[test]
    fn test_offline_tick_expires_and_simulates() {
        let mut hub = Hub::new(HubConfig::default(), 9, 0);
        let mut offline = Offline;
        let mut transport = Offline;
        let mut renderer = RecordingRenderer::default();
        hub.render(&mut renderer, 0).unwrap();

        hub.tick(5001, &mut offline, &mut transport);
        assert_eq!(hub.notifications().active_count(), 0);
        assert!(hub.needs_redraw());

        let report = hub.tick(10_000, &mut offline, &mut transport);
        assert!(report.simulated);
        assert_eq!(hub.link_state(), LinkState::Disconnected);
        assert!(!hub.link_status().network_joined);
    }

    #[test]
    fn test_invalidate_forces_full_repaint() {
        let mut hub = Hub::new(HubConfig::default(), 1, 0);
        let mut renderer = RecordingRenderer::default();
        hub.render(&mut renderer, 0).unwrap();

        hub.invalidate();
        assert_eq!(hub.render(&mut renderer, 10), Ok(true));
        assert_eq!(renderer.pages.len(), 2);
        assert_eq!(renderer.statuses.len(), 2);
    }
}
