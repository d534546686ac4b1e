//! Notification text and severity

use core::ops::Deref;

use heapless::String;
use roadhub_protocol::panel::{clip, MAX_NOTICE_LEN};

use crate::color::Rgb565;

/// Longest notification text, in bytes
pub const MAX_MESSAGE_LEN: usize = MAX_NOTICE_LEN;

/// Bounded notification text
///
/// Construction truncates to [`MAX_MESSAGE_LEN`] bytes on a char boundary,
/// so a `Message` can never overflow a notice frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message(String<MAX_MESSAGE_LEN>);

impl Message {
    pub fn new(text: &str) -> Self {
        let mut inner = String::new();
        // Clipped text always fits
        let _ = inner.push_str(clip(text, MAX_MESSAGE_LEN));
        Self(inner)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl Deref for Message {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

/// How a notification is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Banner color
    pub const fn color(self) -> Rgb565 {
        match self {
            Severity::Info => Rgb565::ELECTRIC_BLUE,
            Severity::Success => Rgb565::GREEN,
            Severity::Warning => Rgb565::AMBER,
            Severity::Error => Rgb565::RED,
        }
    }
}
