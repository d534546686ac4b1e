//! Server session transport

use roadhub_protocol::TransportEvent;

use crate::config::Endpoint;

/// Reasons a transport call can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Outbound queue full; try again later
    Busy,
    /// No session to send on
    NotConnected,
    /// Frame does not fit the link
    TooLarge,
}

/// Text-frame session to the metrics server
///
/// All calls return immediately. Lifecycle changes and inbound frames are
/// reported through [`poll_event`](Transport::poll_event).
pub trait Transport {
    /// Start opening a session; completion arrives as `Opened`
    fn connect(&mut self, endpoint: &Endpoint) -> Result<(), TransportError>;

    /// Queue a text frame
    fn send(&mut self, text: &str) -> Result<(), TransportError>;

    /// Next pending event, if any
    fn poll_event(&mut self) -> Option<TransportEvent>;
}
