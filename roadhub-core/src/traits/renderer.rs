//! Presentation surface

use crate::link::LinkStatus;
use crate::notify::Notification;
use crate::screen::Screen;
use crate::telemetry::TelemetrySnapshot;

/// Something that can show the hub's state
///
/// The renderer owns layout and pixels. The hub decides when a redraw is
/// owed and hands over everything a page needs in one call.
pub trait Renderer {
    type Error;

    /// Redraw the header, body, navigation bar and notification banners
    ///
    /// `notifications` is newest first.
    fn redraw(
        &mut self,
        screen: Screen,
        telemetry: &TelemetrySnapshot,
        notifications: &[&Notification],
    ) -> Result<(), Self::Error>;

    /// Repaint the status bar (network and server indicators, uptime)
    fn draw_status(&mut self, status: LinkStatus, uptime_s: u32) -> Result<(), Self::Error>;
}
