//! Protocol helpers for panel communication
//!
//! Provides convenience functions for encoding pages and status updates.

use roadhub_protocol::{Frame, FrameError, PanelMessage};

use super::{Page, StatusBar};

/// Encode a page to a series of frames
///
/// Returns frames for:
/// 1. Clear body
/// 2. Header for the page's screen
/// 3. Text for each non-empty row
/// 4. Clear banners, then one notice per banner
/// 5. Navigation bar with the page's screen highlighted
pub fn encode_page(page: &Page) -> impl Iterator<Item = Frame> + '_ {
    PageEncoder::new(page)
}

/// Iterator that encodes a page into frames
struct PageEncoder<'a> {
    page: &'a Page,
    state: EncoderState,
    current_row: u8,
    current_notice: usize,
}

#[derive(Clone, Copy)]
enum EncoderState {
    Clear,
    Header,
    Lines,
    ClearNotices,
    Notices,
    NavBar,
    Done,
}

impl<'a> PageEncoder<'a> {
    fn new(page: &'a Page) -> Self {
        Self {
            page,
            state: EncoderState::Clear,
            current_row: 0,
            current_notice: 0,
        }
    }
}

impl<'a> Iterator for PageEncoder<'a> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                EncoderState::Clear => {
                    self.state = EncoderState::Header;
                    return PanelMessage::Clear.to_frame().ok();
                }
                EncoderState::Header => {
                    self.state = EncoderState::Lines;
                    let screen = self.page.screen();
                    let info = screen.info();
                    let msg = PanelMessage::Header {
                        index: screen.index(),
                        color: info.accent.raw(),
                        title: info.title,
                    };
                    return msg.to_frame().ok();
                }
                EncoderState::Lines => {
                    while let Some(row) = self.page.row(self.current_row) {
                        let index = self.current_row;
                        self.current_row += 1;

                        if !row.text.is_empty() {
                            let msg = PanelMessage::Text {
                                row: index,
                                color: row.color.raw(),
                                text: row.text.as_str(),
                            };
                            return msg.to_frame().ok();
                        }
                    }
                    self.state = EncoderState::ClearNotices;
                }
                EncoderState::ClearNotices => {
                    self.state = EncoderState::Notices;
                    return PanelMessage::ClearNotices.to_frame().ok();
                }
                EncoderState::Notices => {
                    if let Some(notice) = self.page.notices().get(self.current_notice) {
                        let msg = PanelMessage::Notice {
                            slot: self.current_notice as u8,
                            color: notice.color.raw(),
                            text: notice.text.as_str(),
                        };
                        self.current_notice += 1;
                        return msg.to_frame().ok();
                    }
                    self.state = EncoderState::NavBar;
                }
                EncoderState::NavBar => {
                    self.state = EncoderState::Done;
                    let msg = PanelMessage::NavBar {
                        active: self.page.screen().index(),
                    };
                    return msg.to_frame().ok();
                }
                EncoderState::Done => return None,
            }
        }
    }
}

/// Build a status bar frame
pub fn status_frame(status: StatusBar) -> Result<Frame, FrameError> {
    PanelMessage::Status {
        network: status.network,
        server: status.server,
        uptime_s: status.uptime_s,
    }
    .to_frame()
}

/// Build a PONG response frame
pub fn pong_frame() -> Result<Frame, FrameError> {
    PanelMessage::Pong.to_frame()
}

// Tests require std feature (not available on embedded target)
#[cfg(all(test, feature = "std"))]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::display::PanelRenderer;
    use alloc::vec::Vec;
    use roadhub_core::color::Rgb565;
    use roadhub_core::config::HubConfig;
    use roadhub_core::notify::{NotificationQueue, Severity};
    use roadhub_core::screen::Screen;
    use roadhub_core::telemetry::TelemetrySnapshot;
    use roadhub_core::traits::Renderer;
    use roadhub_protocol::panel::{
        MSG_CLEAR, MSG_CLEAR_NOTICES, MSG_HEADER, MSG_NAVBAR, MSG_NOTICE, MSG_STATUS, MSG_TEXT,
    };

    fn types(frames: &[Frame]) -> Vec<u8> {
        frames.iter().map(|f| f.msg_type).collect()
    }

    #[test]
    fn test_encode_empty_page() {
        let page = Page::new();
        let frames: Vec<_> = encode_page(&page).collect();

        // Clear, header, clear notices, navbar
        assert_eq!(
            types(&frames),
            [MSG_CLEAR, MSG_HEADER, MSG_CLEAR_NOTICES, MSG_NAVBAR]
        );
        assert_eq!(frames[3].payload[0], 0);
    }

    #[test]
    fn test_encode_page_with_text() {
        let mut page = Page::new();
        page.set_line(0, Rgb565::WHITE, "Hello");
        page.set_line(2, Rgb565::AMBER, "World");

        let frames: Vec<_> = encode_page(&page).collect();

        assert_eq!(
            types(&frames),
            [MSG_CLEAR, MSG_HEADER, MSG_TEXT, MSG_TEXT, MSG_CLEAR_NOTICES, MSG_NAVBAR]
        );
        assert_eq!(frames[3].payload[0], 2);
    }

    #[test]
    fn test_encode_rendered_page_with_notices() {
        let mut queue = NotificationQueue::default();
        queue.push("RoadHub online", Severity::Info, 0);
        queue.push("Server connected", Severity::Success, 5);
        let visible = queue.active_top(3);

        let mut renderer = PanelRenderer::new(&HubConfig::default());
        let _ = renderer.redraw(Screen::Finance, &TelemetrySnapshot::default(), &visible);

        let frames: Vec<_> = encode_page(renderer.page()).collect();
        let notices: Vec<_> = frames
            .iter()
            .filter(|f| f.msg_type == MSG_NOTICE)
            .collect();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].payload[0], 0);
        assert_eq!(&notices[0].payload[3..], b"Server connected");

        let header = &frames[1];
        assert_eq!(header.payload[0], Screen::Finance.index());
        assert_eq!(&header.payload[3..], b"FINANCE");
        assert_eq!(frames.last().unwrap().msg_type, MSG_NAVBAR);
    }

    #[test]
    fn test_status_frame() {
        let frame = status_frame(StatusBar {
            network: true,
            server: false,
            uptime_s: 61,
        })
        .unwrap();
        assert_eq!(frame.msg_type, MSG_STATUS);
        assert_eq!(&frame.payload[..2], &[1, 0]);
    }
}
