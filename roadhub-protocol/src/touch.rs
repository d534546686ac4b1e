//! Touch samples reported by the panel

/// Raw touch report as it appears on the panel link
///
/// Wire layout: `[x lo][x hi][y lo][y hi][pressed]`. A release report
/// (`pressed == false`) repeats the last contact position, since the touch
/// controller itself has no coordinates once the finger is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
    pub x: u16,
    pub y: u16,
    pub pressed: bool,
}

/// Encoded size of a [`TouchReport`]
pub const TOUCH_REPORT_LEN: usize = 5;

impl TouchReport {
    /// Parse a report from a frame payload
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TOUCH_REPORT_LEN {
            return None;
        }
        let pressed = match bytes[4] {
            0 => false,
            1 => true,
            _ => return None,
        };
        Some(Self {
            x: u16::from_le_bytes([bytes[0], bytes[1]]),
            y: u16::from_le_bytes([bytes[2], bytes[3]]),
            pressed,
        })
    }

    /// Convert to wire format
    pub fn to_bytes(self) -> [u8; TOUCH_REPORT_LEN] {
        let x = self.x.to_le_bytes();
        let y = self.y.to_le_bytes();
        [x[0], x[1], y[0], y[1], self.pressed as u8]
    }

    /// Stamp the report with the hub's receive time
    pub fn at(self, timestamp_ms: u32) -> TouchSample {
        TouchSample {
            x: self.x,
            y: self.y,
            pressed: self.pressed,
            timestamp_ms,
        }
    }
}

/// A point-in-time touch reading, as consumed by the gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
    /// `false` signals release
    pub pressed: bool,
    pub timestamp_ms: u32,
}

impl TouchSample {
    /// A finger-down sample
    pub const fn press(x: u16, y: u16, timestamp_ms: u32) -> Self {
        Self {
            x,
            y,
            pressed: true,
            timestamp_ms,
        }
    }

    /// A finger-up sample at the last contact position
    pub const fn release(x: u16, y: u16, timestamp_ms: u32) -> Self {
        Self {
            x,
            y,
            pressed: false,
            timestamp_ms,
        }
    }
}
