//! Network bridge link messages
//!
//! The bridge MCU owns the radio and the WebSocket session. The hub asks it
//! to join the network, to open a session against an endpoint and to send
//! text; the bridge reports network status, session lifecycle and inbound
//! text frames.
//!
//! The bridge keeps reconnecting a dropped session on its own once it has
//! been told where to connect, so `Closed`/`Errored` may be followed by an
//! unsolicited `Opened`.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use heapless::{String, Vec};

// Message type IDs: Hub → Bridge
pub const MSG_JOIN: u8 = 0x40;
pub const MSG_CONNECT: u8 = 0x41;
pub const MSG_SEND: u8 = 0x42;

// Message type IDs: Bridge → Hub
pub const MSG_NET_UP: u8 = 0x50;
pub const MSG_NET_DOWN: u8 = 0x51;
pub const MSG_OPENED: u8 = 0x52;
pub const MSG_CLOSED: u8 = 0x53;
pub const MSG_ERROR: u8 = 0x54;
pub const MSG_TEXT: u8 = 0x55;

/// Owned text frame as carried over the bridge link
pub type TextPayload = String<MAX_PAYLOAD_SIZE>;

/// Session lifecycle and data events
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportEvent {
    /// Session established
    Opened,
    /// Session closed by the peer or the bridge
    Closed,
    /// Session-level error; the bridge retries by itself
    Errored,
    /// Inbound UTF-8 text frame
    FrameReceived(TextPayload),
}

/// Events parsed from bridge-originated frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// Network association gained (`true`) or lost (`false`)
    Network(bool),
    /// Session event
    Transport(TransportEvent),
}

impl BridgeEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let event = match frame.msg_type {
            MSG_NET_UP => BridgeEvent::Network(true),
            MSG_NET_DOWN => BridgeEvent::Network(false),
            MSG_OPENED => BridgeEvent::Transport(TransportEvent::Opened),
            MSG_CLOSED => BridgeEvent::Transport(TransportEvent::Closed),
            MSG_ERROR => BridgeEvent::Transport(TransportEvent::Errored),
            MSG_TEXT => {
                let mut text = TextPayload::new();
                text.push_str(frame.payload_str()?)
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                BridgeEvent::Transport(TransportEvent::FrameReceived(text))
            }
            _ => return Err(FrameError::InvalidFrame),
        };
        Ok(event)
    }

    /// Encode this event into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeEvent::Network(true) => Ok(Frame::empty(MSG_NET_UP)),
            BridgeEvent::Network(false) => Ok(Frame::empty(MSG_NET_DOWN)),
            BridgeEvent::Transport(TransportEvent::Opened) => Ok(Frame::empty(MSG_OPENED)),
            BridgeEvent::Transport(TransportEvent::Closed) => Ok(Frame::empty(MSG_CLOSED)),
            BridgeEvent::Transport(TransportEvent::Errored) => Ok(Frame::empty(MSG_ERROR)),
            BridgeEvent::Transport(TransportEvent::FrameReceived(text)) => {
                Frame::new(MSG_TEXT, text.as_bytes())
            }
        }
    }
}

/// Commands from the hub to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeCommand<'a> {
    /// Join the network. Payload: `[ssid len][ssid][password]`
    Join { ssid: &'a str, password: &'a str },
    /// Open a WebSocket session. Payload: `[port lo][port hi][host len][host][path]`
    Connect {
        host: &'a str,
        port: u16,
        path: &'a str,
    },
    /// Send a text frame on the open session
    Send { text: &'a str },
}

fn push_all(payload: &mut Vec<u8, MAX_PAYLOAD_SIZE>, bytes: &[u8]) -> Result<(), FrameError> {
    payload
        .extend_from_slice(bytes)
        .map_err(|_| FrameError::PayloadTooLarge)
}

fn short_len(text: &str) -> Result<u8, FrameError> {
    u8::try_from(text.len()).map_err(|_| FrameError::PayloadTooLarge)
}

impl<'a> BridgeCommand<'a> {
    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        let msg_type = match self {
            BridgeCommand::Join { ssid, password } => {
                push_all(&mut payload, &[short_len(ssid)?])?;
                push_all(&mut payload, ssid.as_bytes())?;
                push_all(&mut payload, password.as_bytes())?;
                MSG_JOIN
            }
            BridgeCommand::Connect { host, port, path } => {
                push_all(&mut payload, &port.to_le_bytes())?;
                push_all(&mut payload, &[short_len(host)?])?;
                push_all(&mut payload, host.as_bytes())?;
                push_all(&mut payload, path.as_bytes())?;
                MSG_CONNECT
            }
            BridgeCommand::Send { text } => {
                push_all(&mut payload, text.as_bytes())?;
                MSG_SEND
            }
        };
        Frame::new(msg_type, &payload)
    }

    /// Parse a command from a frame (bridge side, and tests)
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let text = |bytes: &'a [u8]| core::str::from_utf8(bytes).map_err(|_| FrameError::InvalidText);
        let payload = &frame.payload[..];

        match frame.msg_type {
            MSG_JOIN => {
                let (&len, rest) = payload.split_first().ok_or(FrameError::InvalidFrame)?;
                if rest.len() < len as usize {
                    return Err(FrameError::InvalidFrame);
                }
                let (ssid, password) = rest.split_at(len as usize);
                Ok(BridgeCommand::Join {
                    ssid: text(ssid)?,
                    password: text(password)?,
                })
            }
            MSG_CONNECT => {
                if payload.len() < 3 {
                    return Err(FrameError::InvalidFrame);
                }
                let port = u16::from_le_bytes([payload[0], payload[1]]);
                let len = payload[2] as usize;
                let rest = &payload[3..];
                if rest.len() < len {
                    return Err(FrameError::InvalidFrame);
                }
                let (host, path) = rest.split_at(len);
                Ok(BridgeCommand::Connect {
                    host: text(host)?,
                    port,
                    path: text(path)?,
                })
            }
            MSG_SEND => Ok(BridgeCommand::Send {
                text: text(payload)?,
            }),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_layout() {
        let cmd = BridgeCommand::Connect {
            host: "192.168.4.74",
            port: 8080,
            path: "/ws",
        };
        let frame = cmd.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_CONNECT);
        assert_eq!(&frame.payload[..3], &[0x90, 0x1F, 12]);
        assert_eq!(&frame.payload[3..15], b"192.168.4.74");
        assert_eq!(&frame.payload[15..], b"/ws");
        assert_eq!(BridgeCommand::from_frame(&frame).unwrap(), cmd);
    }

    #[test]
    fn test_join_with_empty_password() {
        let cmd = BridgeCommand::Join {
            ssid: "roadnet",
            password: "",
        };
        let frame = cmd.to_frame().unwrap();
        assert_eq!(BridgeCommand::from_frame(&frame).unwrap(), cmd);
    }

    #[test]
    fn test_join_truncated_payload() {
        let frame = Frame::new(MSG_JOIN, &[10, b'a']).unwrap();
        assert_eq!(
            BridgeCommand::from_frame(&frame),
            Err(FrameError::InvalidFrame)
        );
    }

    #[test]
    fn test_text_event() {
        let frame = Frame::new(MSG_TEXT, br#"{"cpu":55}"#).unwrap();
        match BridgeEvent::from_frame(&frame).unwrap() {
            BridgeEvent::Transport(TransportEvent::FrameReceived(text)) => {
                assert_eq!(text.as_str(), r#"{"cpu":55}"#);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_text_event_invalid_utf8() {
        let frame = Frame::new(MSG_TEXT, &[0xFF, 0xFE]).unwrap();
        assert_eq!(BridgeEvent::from_frame(&frame), Err(FrameError::InvalidText));
    }

    #[test]
    fn test_lifecycle_events() {
        assert_eq!(
            BridgeEvent::from_frame(&Frame::empty(MSG_NET_UP)),
            Ok(BridgeEvent::Network(true))
        );
        assert_eq!(
            BridgeEvent::from_frame(&Frame::empty(MSG_CLOSED)),
            Ok(BridgeEvent::Transport(TransportEvent::Closed))
        );
        assert_eq!(
            BridgeEvent::from_frame(&Frame::empty(0x99)),
            Err(FrameError::InvalidFrame)
        );
    }
}
