//! Network bridge collaborators
//!
//! The link manager drives the bridge through the core traits. Calls never
//! block: requests are queued for the bridge TX task and events are drained
//! from what the bridge RX task has collected.

use roadhub_core::config::{Credentials, Endpoint};
use roadhub_core::traits::{NetworkInterface, Transport, TransportError};
use roadhub_protocol::{
    BridgeCommand, Frame, FrameError, TextPayload, TransportEvent, MAX_PAYLOAD_SIZE,
};

use defmt::*;
use portable_atomic::Ordering;

use crate::channels::{BRIDGE_EVENTS, BRIDGE_REQUESTS, NETWORK_UP};

/// Whether an event changes session state
///
/// Lifecycle events are never dropped on the way to the link manager.
pub fn is_lifecycle(event: &TransportEvent) -> bool {
    !matches!(event, TransportEvent::FrameReceived(_))
}

/// Owned request queued for the bridge TX task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeRequest {
    Join(Credentials),
    Connect(Endpoint),
    Send(TextPayload),
}

impl BridgeRequest {
    /// Short name for logs (never prints credentials)
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeRequest::Join(_) => "join",
            BridgeRequest::Connect(_) => "connect",
            BridgeRequest::Send(_) => "send",
        }
    }

    /// Encode for the bridge link
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let command = match self {
            BridgeRequest::Join(credentials) => BridgeCommand::Join {
                ssid: credentials.ssid.as_str(),
                password: credentials.password.as_str(),
            },
            BridgeRequest::Connect(endpoint) => BridgeCommand::Connect {
                host: endpoint.host.as_str(),
                port: endpoint.port,
                path: endpoint.path.as_str(),
            },
            BridgeRequest::Send(text) => BridgeCommand::Send {
                text: text.as_str(),
            },
        };
        command.to_frame()
    }
}

/// Network association as seen through the bridge
pub struct BridgeNetwork;

impl NetworkInterface for BridgeNetwork {
    fn begin_join(&mut self, credentials: &Credentials) {
        if BRIDGE_REQUESTS
            .try_send(BridgeRequest::Join(credentials.clone()))
            .is_err()
        {
            // The join retry timer asks again
            warn!("Bridge queue full, join request dropped");
        }
    }

    fn is_joined(&self) -> bool {
        NETWORK_UP.load(Ordering::Relaxed)
    }
}

/// WebSocket session hosted by the bridge
pub struct BridgeSession;

impl Transport for BridgeSession {
    fn connect(&mut self, endpoint: &Endpoint) -> Result<(), TransportError> {
        BRIDGE_REQUESTS
            .try_send(BridgeRequest::Connect(endpoint.clone()))
            .map_err(|_| TransportError::Busy)
    }

    fn send(&mut self, text: &str) -> Result<(), TransportError> {
        if text.len() > MAX_PAYLOAD_SIZE {
            return Err(TransportError::TooLarge);
        }
        let mut payload = TextPayload::new();
        payload
            .push_str(text)
            .map_err(|_| TransportError::TooLarge)?;
        BRIDGE_REQUESTS
            .try_send(BridgeRequest::Send(payload))
            .map_err(|_| TransportError::Busy)
    }

    fn poll_event(&mut self) -> Option<TransportEvent> {
        BRIDGE_EVENTS.try_receive().ok()
    }
}
