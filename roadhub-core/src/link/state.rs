//! Link states and per-poll reports

use heapless::Vec;
use roadhub_protocol::DecodeError;

use crate::traits::TransportError;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No session; joining or waiting to rejoin
    #[default]
    Disconnected,
    /// Network up, session requested but not open yet
    NetworkJoined,
    /// Session open, remote data flowing
    Connected,
}

/// What the status bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    pub state: LinkState,
    pub network_joined: bool,
}

impl LinkStatus {
    /// Server indicator
    pub fn server_connected(&self) -> bool {
        self.state == LinkState::Connected
    }
}

/// Something that happened during a poll, for the caller to log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkNote {
    /// Join requested from the network interface
    JoinStarted,
    /// Join gave up after this many retries; cooling down
    JoinFailed { attempts: u8 },
    NetworkJoined,
    NetworkLost,
    /// Session open requested from the transport
    ConnectRequested,
    ConnectFailed(TransportError),
    SessionOpened,
    SessionClosed,
    SessionErrored,
    /// Remote update merged into the telemetry store
    FrameMerged,
    /// Frame decoded but carried no known field
    FrameIgnored,
    /// Frame arrived while no session was open
    FrameOutOfSession,
    /// Frame failed to decode and was dropped whole
    FrameDropped(DecodeError),
    MetricsRequested,
    SendFailed(TransportError),
    /// Local simulation step applied
    Simulated,
}

/// Maximum notes kept per poll
pub const MAX_NOTES: usize = 16;

/// Outcome of one [`poll`](super::LinkManager::poll)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    notes: Vec<LinkNote, MAX_NOTES>,
    /// Remote data was merged during this poll
    pub merged: bool,
    /// A simulation step ran during this poll
    pub simulated: bool,
}

impl LinkReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a note; notes beyond [`MAX_NOTES`] are dropped
    pub fn note(&mut self, note: LinkNote) {
        let _ = self.notes.push(note);
    }

    pub fn notes(&self) -> &[LinkNote] {
        &self.notes
    }

    pub fn contains(&self, note: LinkNote) -> bool {
        self.notes.contains(&note)
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
