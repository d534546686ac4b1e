//! Link lifecycle state machine

use roadhub_protocol::telemetry::{GET_METRICS, SUBSCRIBE_METRICS};
use roadhub_protocol::{decode_update, TransportEvent};

use super::state::{LinkNote, LinkReport, LinkState, LinkStatus};
use crate::config::{Credentials, Endpoint, LinkConfig};
use crate::notify::{NotificationQueue, Severity};
use crate::telemetry::TelemetryStore;
use crate::traits::{NetworkInterface, Transport};

/// Transport events handled per poll; the rest wait for the next one
pub const MAX_EVENTS_PER_POLL: usize = 8;

/// Progress of a network join while disconnected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinPhase {
    /// Nothing in progress; next poll starts a join
    Idle,
    /// Join requested, status checked every `join_retry_ms`
    Joining { retries: u8, last_check_ms: u32 },
    /// Join gave up; wait `rejoin_cooldown_ms` before the next one
    CoolingDown { since_ms: u32 },
}

/// Drives the network join, the server session and the data cadence
#[derive(Debug, Clone)]
pub struct LinkManager {
    config: LinkConfig,
    endpoint: Endpoint,
    credentials: Credentials,
    state: LinkState,
    network_joined: bool,
    join: JoinPhase,
    /// `transport.connect` was accepted for the current join
    session_requested: bool,
    last_connect_ms: u32,
    last_metrics_ms: u32,
    last_simulation_ms: u32,
}

impl LinkManager {
    /// Create a manager; the first simulation step is due one interval
    /// after `now_ms`
    pub fn new(
        config: LinkConfig,
        endpoint: Endpoint,
        credentials: Credentials,
        now_ms: u32,
    ) -> Self {
        Self {
            config,
            endpoint,
            credentials,
            state: LinkState::Disconnected,
            network_joined: false,
            join: JoinPhase::Idle,
            session_requested: false,
            last_connect_ms: now_ms,
            last_metrics_ms: now_ms,
            last_simulation_ms: now_ms,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn status(&self) -> LinkStatus {
        LinkStatus {
            state: self.state,
            network_joined: self.network_joined,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Advance the link by one control-loop step
    ///
    /// Drains pending transport events, then progresses the join or checks
    /// that the network is still there, then runs whichever cadence applies:
    /// the metrics pull while connected, or a simulation step while not
    /// (never in a poll that merged remote data).
    pub fn poll<N, T>(
        &mut self,
        now_ms: u32,
        network: &mut N,
        transport: &mut T,
        telemetry: &mut TelemetryStore,
        notifications: &mut NotificationQueue,
    ) -> LinkReport
    where
        N: NetworkInterface,
        T: Transport,
    {
        let mut report = LinkReport::new();

        for _ in 0..MAX_EVENTS_PER_POLL {
            let Some(event) = transport.poll_event() else {
                break;
            };
            self.handle_event(event, now_ms, transport, telemetry, notifications, &mut report);
        }

        match self.state {
            LinkState::Disconnected => {
                self.advance_join(now_ms, network, transport, &mut report);
            }
            LinkState::NetworkJoined | LinkState::Connected => {
                if !network.is_joined() {
                    report.note(LinkNote::NetworkLost);
                    self.network_joined = false;
                    self.enter_disconnected(now_ms, notifications);
                } else if self.state == LinkState::NetworkJoined
                    && !self.session_requested
                    && now_ms.wrapping_sub(self.last_connect_ms) >= self.config.join_retry_ms
                {
                    self.request_session(now_ms, transport, &mut report);
                }
            }
        }

        if self.state == LinkState::Connected {
            if now_ms.wrapping_sub(self.last_metrics_ms) >= self.config.metrics_interval_ms {
                self.last_metrics_ms = now_ms;
                match transport.send(GET_METRICS) {
                    Ok(()) => report.note(LinkNote::MetricsRequested),
                    Err(e) => report.note(LinkNote::SendFailed(e)),
                }
            }
        } else if !report.merged
            && now_ms.wrapping_sub(self.last_simulation_ms) >= self.config.simulation_interval_ms
        {
            self.last_simulation_ms = now_ms;
            telemetry.apply_simulation_step();
            report.simulated = true;
            report.note(LinkNote::Simulated);
        }

        report
    }

    fn handle_event<T: Transport>(
        &mut self,
        event: TransportEvent,
        now_ms: u32,
        transport: &mut T,
        telemetry: &mut TelemetryStore,
        notifications: &mut NotificationQueue,
        report: &mut LinkReport,
    ) {
        match event {
            TransportEvent::Opened => {
                report.note(LinkNote::SessionOpened);
                if self.state == LinkState::Connected {
                    return;
                }
                self.state = LinkState::Connected;
                self.network_joined = true;
                self.join = JoinPhase::Idle;
                self.session_requested = true;
                self.last_metrics_ms = now_ms;
                notifications.push("Server connected", Severity::Success, now_ms);
                if let Err(e) = transport.send(SUBSCRIBE_METRICS) {
                    report.note(LinkNote::SendFailed(e));
                }
            }
            TransportEvent::Closed => {
                report.note(LinkNote::SessionClosed);
                self.enter_disconnected(now_ms, notifications);
            }
            TransportEvent::Errored => {
                report.note(LinkNote::SessionErrored);
                self.state = LinkState::Disconnected;
                self.session_requested = false;
            }
            TransportEvent::FrameReceived(text) => {
                if self.state != LinkState::Connected {
                    report.note(LinkNote::FrameOutOfSession);
                    return;
                }
                match decode_update(&text) {
                    Ok(update) => {
                        if telemetry.apply_remote_update(&update) {
                            report.merged = true;
                            report.note(LinkNote::FrameMerged);
                        } else {
                            report.note(LinkNote::FrameIgnored);
                        }
                    }
                    Err(e) => report.note(LinkNote::FrameDropped(e)),
                }
            }
        }
    }

    /// Drop to `Disconnected`, announcing it if a session was open
    fn enter_disconnected(&mut self, now_ms: u32, notifications: &mut NotificationQueue) {
        if self.state == LinkState::Connected {
            notifications.push("Server disconnected", Severity::Error, now_ms);
        }
        self.state = LinkState::Disconnected;
        self.session_requested = false;
    }

    fn advance_join<N, T>(
        &mut self,
        now_ms: u32,
        network: &mut N,
        transport: &mut T,
        report: &mut LinkReport,
    ) where
        N: NetworkInterface,
        T: Transport,
    {
        if let JoinPhase::CoolingDown { since_ms } = self.join {
            if now_ms.wrapping_sub(since_ms) < self.config.rejoin_cooldown_ms {
                return;
            }
            self.join = JoinPhase::Idle;
        }

        let retries = match self.join {
            JoinPhase::Idle => {
                if !network.is_joined() {
                    network.begin_join(&self.credentials);
                    report.note(LinkNote::JoinStarted);
                }
                0
            }
            JoinPhase::Joining {
                retries,
                last_check_ms,
            } => {
                if now_ms.wrapping_sub(last_check_ms) < self.config.join_retry_ms {
                    return;
                }
                retries.saturating_add(1)
            }
            JoinPhase::CoolingDown { .. } => return,
        };

        self.network_joined = network.is_joined();
        if self.network_joined {
            self.join = JoinPhase::Idle;
            self.state = LinkState::NetworkJoined;
            report.note(LinkNote::NetworkJoined);
            self.request_session(now_ms, transport, report);
        } else if retries >= self.config.join_attempts {
            self.join = JoinPhase::CoolingDown { since_ms: now_ms };
            report.note(LinkNote::JoinFailed { attempts: retries });
        } else {
            self.join = JoinPhase::Joining {
                retries,
                last_check_ms: now_ms,
            };
        }
    }

    fn request_session<T: Transport>(
        &mut self,
        now_ms: u32,
        transport: &mut T,
        report: &mut LinkReport,
    ) {
        self.last_connect_ms = now_ms;
        match transport.connect(&self.endpoint) {
            Ok(()) => {
                self.session_requested = true;
                report.note(LinkNote::ConnectRequested);
            }
            Err(e) => {
                self.session_requested = false;
                report.note(LinkNote::ConnectFailed(e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::collections::VecDeque;
    use std::string::String;
    use std::vec::Vec;

    use super::*;
    use crate::config::NotificationConfig;
    use crate::traits::TransportError;
    use roadhub_protocol::{DecodeError, TextPayload};

    #[derive(Default)]
    struct MockNetwork {
        joined: bool,
        join_on_begin: bool,
        begin_calls: u32,
    }

    impl NetworkInterface for MockNetwork {
        fn begin_join(&mut self, _credentials: &Credentials) {
            self.begin_calls += 1;
            if self.join_on_begin {
                self.joined = true;
            }
        }

        fn is_joined(&self) -> bool {
            self.joined
        }
    }

    #[derive(Default)]
    struct MockTransport {
        events: VecDeque<TransportEvent>,
        sent: Vec<String>,
        connects: u32,
        fail_send: bool,
    }

    impl MockTransport {
        fn push(&mut self, event: TransportEvent) {
            self.events.push_back(event);
        }

        fn push_text(&mut self, text: &str) {
            let mut payload = TextPayload::new();
            payload.push_str(text).unwrap();
            self.push(TransportEvent::FrameReceived(payload));
        }
    }

    impl Transport for MockTransport {
        fn connect(&mut self, _endpoint: &Endpoint) -> Result<(), TransportError> {
            self.connects += 1;
            Ok(())
        }

        fn send(&mut self, text: &str) -> Result<(), TransportError> {
            if self.fail_send {
                return Err(TransportError::Busy);
            }
            self.sent.push(String::from(text));
            Ok(())
        }

        fn poll_event(&mut self) -> Option<TransportEvent> {
            self.events.pop_front()
        }
    }

    struct Rig {
        link: LinkManager,
        network: MockNetwork,
        transport: MockTransport,
        telemetry: TelemetryStore,
        notifications: NotificationQueue,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                link: LinkManager::new(
                    LinkConfig::default(),
                    Endpoint::default(),
                    Credentials::default(),
                    0,
                ),
                network: MockNetwork {
                    join_on_begin: true,
                    ..Default::default()
                },
                transport: MockTransport::default(),
                telemetry: TelemetryStore::new(3),
                notifications: NotificationQueue::new(NotificationConfig::default()),
            }
        }

        fn poll(&mut self, now_ms: u32) -> LinkReport {
            self.link.poll(
                now_ms,
                &mut self.network,
                &mut self.transport,
                &mut self.telemetry,
                &mut self.notifications,
            )
        }

        /// Join, connect and open a session at `now_ms`
        fn connected(now_ms: u32) -> Self {
            let mut rig = Self::new();
            rig.poll(now_ms);
            rig.transport.push(TransportEvent::Opened);
            rig.poll(now_ms);
            rig.telemetry.take_dirty();
            rig.notifications.take_dirty();
            rig
        }
    }

    #[test]
    fn test_join_then_connect() {
        let mut rig = Rig::new();
        let report = rig.poll(0);

        assert!(report.contains(LinkNote::JoinStarted));
        assert!(report.contains(LinkNote::NetworkJoined));
        assert!(report.contains(LinkNote::ConnectRequested));
        assert_eq!(rig.link.state(), LinkState::NetworkJoined);
        assert!(rig.link.status().network_joined);
        assert_eq!(rig.transport.connects, 1);

        // Waiting for the session does not re-request it
        rig.poll(2000);
        assert_eq!(rig.transport.connects, 1);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut rig = Rig::new();
        rig.poll(0);

        rig.transport.push(TransportEvent::Opened);
        rig.transport.push_text(r#"{"cpu":55}"#);
        rig.transport.push(TransportEvent::Closed);
        let report = rig.poll(100);

        assert_eq!(rig.notifications.active_count(), 2);
        let top = rig.notifications.active_top(2);
        assert_eq!(top[0].message.as_str(), "Server disconnected");
        assert_eq!(top[0].severity, Severity::Error);
        assert_eq!(top[1].message.as_str(), "Server connected");
        assert_eq!(top[1].severity, Severity::Success);

        assert_eq!(rig.telemetry.snapshot().cpu_usage_pct, 55);
        assert!(report.merged);
        assert!(!report.simulated);
        assert!(report.contains(LinkNote::SessionClosed));
        // Network is still up, so the same poll asks for a new session
        assert_eq!(rig.link.state(), LinkState::NetworkJoined);
        assert_eq!(rig.transport.connects, 2);
        assert_eq!(rig.transport.sent, [SUBSCRIBE_METRICS]);
    }

    #[test]
    fn test_invalid_frame_dropped_silently() {
        let mut rig = Rig::connected(0);
        let before = rig.telemetry.snapshot();

        rig.transport.push_text("not json");
        rig.transport.push_text(r#"{"cpu":12,"projects":"many"}"#);
        let report = rig.poll(10);

        assert!(report.contains(LinkNote::FrameDropped(DecodeError::NotAnObject)));
        assert!(report.contains(LinkNote::FrameDropped(DecodeError::Data)));
        assert_eq!(rig.telemetry.snapshot(), before);
        assert!(!rig.telemetry.is_dirty());
        assert!(!rig.notifications.is_dirty());
    }

    #[test]
    fn test_frames_outside_session_dropped() {
        let mut rig = Rig::new();
        rig.poll(0);
        rig.transport.push_text(r#"{"cpu":99}"#);
        let report = rig.poll(10);
        assert!(report.contains(LinkNote::FrameOutOfSession));
        assert_eq!(rig.telemetry.snapshot().cpu_usage_pct, 0);
    }

    #[test]
    fn test_metrics_cadence() {
        let mut rig = Rig::connected(1000);
        rig.transport.sent.clear();

        rig.poll(5999);
        assert!(rig.transport.sent.is_empty());

        let report = rig.poll(6000);
        assert!(report.contains(LinkNote::MetricsRequested));
        assert_eq!(rig.transport.sent, [GET_METRICS]);

        rig.poll(10_999);
        assert_eq!(rig.transport.sent.len(), 1);
        rig.poll(11_000);
        assert_eq!(rig.transport.sent.len(), 2);
    }

    #[test]
    fn test_send_failure_is_reported() {
        let mut rig = Rig::connected(0);
        rig.transport.fail_send = true;
        let report = rig.poll(5000);
        assert!(report.contains(LinkNote::SendFailed(TransportError::Busy)));
        assert_eq!(rig.link.state(), LinkState::Connected);
    }

    #[test]
    fn test_no_simulation_while_connected() {
        let mut rig = Rig::connected(0);
        for t in (0..60_000).step_by(250) {
            let report = rig.poll(t);
            assert!(!report.simulated);
        }
        assert!(!rig.telemetry.is_dirty());
    }

    #[test]
    fn test_simulation_while_disconnected() {
        let mut rig = Rig::new();
        rig.network.join_on_begin = false;

        assert!(!rig.poll(9999).simulated);
        let report = rig.poll(10_000);
        assert!(report.simulated);
        assert!(rig.telemetry.take_dirty());

        assert!(!rig.poll(19_999).simulated);
        assert!(rig.poll(20_000).simulated);
    }

    #[test]
    fn test_no_simulation_in_merging_poll() {
        let mut rig = Rig::new();
        rig.poll(0);
        rig.transport.push(TransportEvent::Opened);
        rig.transport.push_text(r#"{"memory":40}"#);
        rig.transport.push(TransportEvent::Closed);

        // Due for a simulation step, but the poll merged remote data
        let report = rig.poll(10_000);
        assert!(report.merged);
        assert!(!report.simulated);

        let report = rig.poll(10_050);
        assert!(report.simulated);
    }

    #[test]
    fn test_join_retry_and_cooldown() {
        let mut rig = Rig::new();
        rig.network.join_on_begin = false;

        rig.poll(0);
        assert_eq!(rig.network.begin_calls, 1);
        assert_eq!(rig.link.state(), LinkState::Disconnected);

        let mut failed_at = None;
        for t in (0..=10_000).step_by(100) {
            let report = rig.poll(t);
            if report.contains(LinkNote::JoinFailed { attempts: 20 }) {
                failed_at = Some(t);
            }
        }
        assert_eq!(failed_at, Some(10_000));

        // Cooling down: no new join before 30 s have passed
        rig.poll(39_999);
        assert_eq!(rig.network.begin_calls, 1);
        let report = rig.poll(40_000);
        assert!(report.contains(LinkNote::JoinStarted));
        assert_eq!(rig.network.begin_calls, 2);
    }

    #[test]
    fn test_join_succeeds_on_retry() {
        let mut rig = Rig::new();
        rig.network.join_on_begin = false;
        rig.poll(0);

        rig.network.joined = true;
        // Not checked before the retry interval
        rig.poll(499);
        assert_eq!(rig.link.state(), LinkState::Disconnected);
        rig.poll(500);
        assert_eq!(rig.link.state(), LinkState::NetworkJoined);
        assert_eq!(rig.transport.connects, 1);
    }

    #[test]
    fn test_network_loss_while_connected() {
        let mut rig = Rig::connected(0);
        rig.network.joined = false;
        rig.network.join_on_begin = false;

        let report = rig.poll(100);
        assert!(report.contains(LinkNote::NetworkLost));
        assert_eq!(rig.link.state(), LinkState::Disconnected);
        assert!(!rig.link.status().network_joined);
        assert_eq!(
            rig.notifications.active_top(1)[0].message.as_str(),
            "Server disconnected"
        );

        // A late close from the bridge is not announced again
        rig.transport.push(TransportEvent::Closed);
        rig.notifications.take_dirty();
        rig.poll(200);
        assert!(!rig.notifications.is_dirty());
    }

    #[test]
    fn test_errored_is_not_announced() {
        let mut rig = Rig::connected(0);
        rig.transport.push(TransportEvent::Errored);
        let report = rig.poll(10);
        assert!(report.contains(LinkNote::SessionErrored));
        assert!(!rig.notifications.is_dirty());
        assert_ne!(rig.link.state(), LinkState::Connected);
    }

    #[test]
    fn test_reconnect_after_close() {
        let mut rig = Rig::connected(0);
        rig.transport.push(TransportEvent::Closed);
        rig.poll(100);
        rig.poll(200);
        // One connect for the first join, one after the close
        assert_eq!(rig.link.state(), LinkState::NetworkJoined);
        assert_eq!(rig.transport.connects, 2);

        rig.transport.push(TransportEvent::Opened);
        rig.poll(300);
        assert_eq!(rig.link.state(), LinkState::Connected);
    }

    #[test]
    fn test_events_drained_in_bounded_batches() {
        let mut rig = Rig::connected(0);
        for _ in 0..MAX_EVENTS_PER_POLL + 3 {
            rig.transport.push_text(r#"{"cpu":1}"#);
        }
        rig.poll(10);
        assert_eq!(rig.transport.events.len(), 3);
        rig.poll(20);
        assert!(rig.transport.events.is_empty());
    }
}
