//! Panel link messages
//!
//! Message types are divided into two categories:
//! - Panel → Hub: touch reports, heartbeat requests
//! - Hub → Panel: drawing commands, heartbeat responses
//!
//! The panel owns every pixel decision (fonts, layout, palette lookups); the
//! hub only says which screen is up, what text goes in which row and which
//! color tag it carries.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::touch::TouchReport;
use heapless::Vec;

// Message type IDs: Panel → Hub
pub const MSG_TOUCH: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;

// Message type IDs: Hub → Panel
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_HEADER: u8 = 0x21;
pub const MSG_NAVBAR: u8 = 0x22;
pub const MSG_TEXT: u8 = 0x23;
pub const MSG_NOTICE: u8 = 0x24;
pub const MSG_CLEAR_NOTICES: u8 = 0x25;
pub const MSG_STATUS: u8 = 0x26;
pub const MSG_PONG: u8 = 0x27;

/// Body rows available between header and navigation bar
pub const PANEL_ROWS: u8 = 12;

/// Characters per body row at the smallest font
pub const PANEL_COLS: usize = 40;

/// Maximum notice text carried in one frame
pub const MAX_NOTICE_LEN: usize = 99;

/// Messages from the hub to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelMessage<'a> {
    /// Clear the body area
    Clear,
    /// Draw the header bar for a screen
    Header { index: u8, color: u16, title: &'a str },
    /// Draw the navigation bar with one button highlighted
    NavBar { active: u8 },
    /// Draw a text row in the body area
    Text { row: u8, color: u16, text: &'a str },
    /// Draw a notification banner in a slot
    Notice { slot: u8, color: u16, text: &'a str },
    /// Remove all notification banners
    ClearNotices,
    /// Draw the status bar
    Status {
        network: bool,
        server: bool,
        uptime_s: u32,
    },
    /// Heartbeat response
    Pong,
}

/// Longest prefix of `text` that fits in `max` bytes without splitting a char
pub fn clip(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn tagged_text(
    msg_type: u8,
    tag: u8,
    color: u16,
    text: &str,
    max: usize,
) -> Result<Frame, FrameError> {
    let text = clip(text, max);
    let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
    payload.push(tag).map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(&color.to_le_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    payload
        .extend_from_slice(text.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    Frame::new(msg_type, &payload)
}

impl<'a> PanelMessage<'a> {
    /// Encode this message into a frame
    ///
    /// Text is clipped to what the panel can show; clipping never splits a
    /// UTF-8 sequence.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            PanelMessage::Header {
                index,
                color,
                title,
            } => tagged_text(MSG_HEADER, *index, *color, title, PANEL_COLS),
            PanelMessage::NavBar { active } => Frame::new(MSG_NAVBAR, &[*active]),
            PanelMessage::Text { row, color, text } => {
                if *row >= PANEL_ROWS {
                    return Err(FrameError::InvalidFrame);
                }
                tagged_text(MSG_TEXT, *row, *color, text, PANEL_COLS)
            }
            PanelMessage::Notice { slot, color, text } => {
                tagged_text(MSG_NOTICE, *slot, *color, text, MAX_NOTICE_LEN)
            }
            PanelMessage::ClearNotices => Ok(Frame::empty(MSG_CLEAR_NOTICES)),
            PanelMessage::Status {
                network,
                server,
                uptime_s,
            } => {
                let up = uptime_s.to_le_bytes();
                Frame::new(
                    MSG_STATUS,
                    &[*network as u8, *server as u8, up[0], up[1], up[2], up[3]],
                )
            }
            PanelMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }
}

/// Commands parsed from panel-originated frames
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelCommand {
    /// Touch controller reading
    Touch(TouchReport),
    /// Heartbeat request
    Ping,
}

impl PanelCommand {
    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_TOUCH => TouchReport::from_bytes(&frame.payload)
                .map(PanelCommand::Touch)
                .ok_or(FrameError::InvalidFrame),
            MSG_PING => Ok(PanelCommand::Ping),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode this command into a frame (for testing or simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            PanelCommand::Touch(report) => Frame::new(MSG_TOUCH, &report.to_bytes()),
            PanelCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}
