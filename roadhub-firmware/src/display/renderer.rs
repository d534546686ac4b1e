//! Page rendering
//!
//! Builds pages for the six screens.
//!
//! The panel shows a header, 12 body rows of up to 40 characters, up to
//! three notification banners and a navigation bar. Fonts and pixel layout
//! live on the panel; each row here is just text plus a color.

use core::convert::Infallible;
use core::fmt::{self, Write};

use heapless::{String, Vec};
use roadhub_core::color::Rgb565;
use roadhub_core::config::{Endpoint, HubConfig, MAX_SSID_LEN};
use roadhub_core::format::{format_bytes, format_change, format_count};
use roadhub_core::hub::MAX_VISIBLE_NOTIFICATIONS;
use roadhub_core::link::LinkStatus;
use roadhub_core::notify::{Message, Notification};
use roadhub_core::screen::{Screen, STUDIOS};
use roadhub_core::telemetry::TelemetrySnapshot;
use roadhub_core::traits::Renderer;
use roadhub_protocol::panel::{clip, PANEL_COLS, PANEL_ROWS};

const ROWS: usize = PANEL_ROWS as usize;

/// Text of one body row
pub type RowText = String<PANEL_COLS>;

/// One body row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub color: Rgb565,
    pub text: RowText,
}

impl Row {
    const BLANK: Self = Self {
        color: Rgb565::WHITE,
        text: String::new(),
    };
}

/// One notification banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub color: Rgb565,
    pub text: Message,
}

/// Status bar content
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct StatusBar {
    pub network: bool,
    pub server: bool,
    pub uptime_s: u32,
}

impl StatusBar {
    pub fn new(status: LinkStatus, uptime_s: u32) -> Self {
        Self {
            network: status.network_joined,
            server: status.server_connected(),
            uptime_s,
        }
    }
}

/// A page buffer that can be sent to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    screen: Screen,
    rows: [Row; ROWS],
    notices: Vec<Notice, MAX_VISIBLE_NOTIFICATIONS>,
}

impl Page {
    /// Create an empty Home page
    pub const fn new() -> Self {
        Self {
            screen: Screen::Home,
            rows: [Row::BLANK; ROWS],
            notices: Vec::new(),
        }
    }

    /// Clear body rows and banners
    pub fn clear(&mut self) {
        self.clear_lines();
        self.notices.clear();
    }

    fn clear_lines(&mut self) {
        for row in &mut self.rows {
            row.color = Rgb565::WHITE;
            row.text.clear();
        }
    }

    /// Set text at a specific row
    pub fn set_line(&mut self, row: u8, color: Rgb565, text: &str) {
        if let Some(slot) = self.rows.get_mut(row as usize) {
            slot.color = color;
            slot.text.clear();
            let _ = slot.text.push_str(clip(text, PANEL_COLS));
        }
    }

    /// Set formatted text at a specific row, clipped to the row width
    pub fn write_line(&mut self, row: u8, color: Rgb565, args: fmt::Arguments<'_>) {
        let mut scratch = String::<128>::new();
        let _ = scratch.write_fmt(args);
        self.set_line(row, color, &scratch);
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Get a body row
    pub fn row(&self, row: u8) -> Option<&Row> {
        self.rows.get(row as usize)
    }

    /// Get the text of a body row ("" when out of range)
    pub fn get_line(&self, row: u8) -> &str {
        self.row(row).map(|r| r.text.as_str()).unwrap_or("")
    }

    /// Banners, newest first
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// Recent projects listed on the projects screen
const RECENT_PROJECTS: [&str; 3] = ["RoadView Platform", "Lucidia AI Core", "RoadCoin Exchange"];

/// Agent roster: name, role, online
const AGENTS: [(&str, &str, bool); 8] = [
    ("Lucidia", "Master AI", true),
    ("Roadie", "Tutor", true),
    ("Radius", "Quantum", true),
    ("Athena", "Code Review", false),
    ("Guardian", "Security", true),
    ("Alice", "Governance", true),
    ("Aria", "Design", true),
    ("Cece", "Personal AI", true),
];

/// Holdings shown on the finance screen
const HOLDINGS: [(&str, Rgb565); 3] = [
    ("ETH: 2.5 ($8.0K)", Rgb565::ELECTRIC_BLUE),
    ("SOL: 100 ($18.0K)", Rgb565::VIOLET),
    ("BTC: 0.1 ($9.5K)", Rgb565::AMBER),
];

fn indicator_color(up: bool) -> Rgb565 {
    if up {
        Rgb565::GREEN
    } else {
        Rgb565::RED
    }
}

fn connected_label(up: bool) -> &'static str {
    if up {
        "Connected"
    } else {
        "Disconnected"
    }
}

/// Renderer that lays out pages for the panel
///
/// Implements the core [`Renderer`] into an in-memory [`Page`]. The
/// controller copies the page into the shared buffer once a draw
/// succeeded; drawing itself never fails.
pub struct PanelRenderer {
    page: Page,
    server: Endpoint,
    ssid: String<MAX_SSID_LEN>,
    link: LinkStatus,
    page_changed: bool,
    status: Option<StatusBar>,
}

impl PanelRenderer {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            page: Page::new(),
            server: config.server.clone(),
            ssid: config.network.ssid.clone(),
            link: LinkStatus::default(),
            page_changed: false,
            status: None,
        }
    }

    /// Get the current page
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Clear and return whether the page changed since the last call
    pub fn take_page_changed(&mut self) -> bool {
        core::mem::replace(&mut self.page_changed, false)
    }

    /// Status bar drawn since the last call, if any
    pub fn take_status(&mut self) -> Option<StatusBar> {
        self.status.take()
    }

    fn layout_home(&mut self, t: &TelemetrySnapshot) {
        let page = &mut self.page;
        page.set_line(0, Rgb565::HOT_PINK, "CEO CONTROL");
        page.set_line(1, Rgb565::LIGHT_GRAY, "\"You bring the chaos.");
        page.set_line(2, Rgb565::LIGHT_GRAY, "BlackRoad brings structure,");
        page.set_line(3, Rgb565::LIGHT_GRAY, "compute, and care.\"");

        page.write_line(
            5,
            Rgb565::WHITE,
            format_args!("Projects: {}", format_count(t.project_count)),
        );
        page.write_line(
            6,
            Rgb565::WHITE,
            format_args!(
                "AI Agents: {} ({} active)",
                format_count(t.agent_count),
                t.active_agents
            ),
        );
        page.write_line(
            7,
            Rgb565::AMBER,
            format_args!(
                "RoadCoin: ${:.4} {}",
                t.road_coin_price,
                format_change(t.road_coin_change_24h)
            ),
        );

        page.set_line(8, Rgb565::ELECTRIC_BLUE, "System Metrics:");
        page.write_line(9, Rgb565::WHITE, format_args!("CPU: {}%", t.cpu_usage_pct));
        page.write_line(10, Rgb565::WHITE, format_args!("Memory: {}%", t.mem_usage_pct));
        page.write_line(
            11,
            Rgb565::WHITE,
            format_args!("Network: {}/s", format_bytes(t.network_bytes_per_sec)),
        );
    }

    fn layout_projects(&mut self, t: &TelemetrySnapshot) {
        let total = u64::from(t.project_count);
        let active = (total * 38 / 100) as u32;
        let done = (total * 62 / 100) as u32;

        let page = &mut self.page;
        page.write_line(
            0,
            Rgb565::ELECTRIC_BLUE,
            format_args!("Total: {}", format_count(t.project_count)),
        );
        page.write_line(
            1,
            Rgb565::GREEN,
            format_args!("Active: {} (38%)", format_count(active)),
        );
        page.write_line(
            2,
            Rgb565::VIOLET,
            format_args!("Done: {} (62%)", format_count(done)),
        );

        page.set_line(4, Rgb565::AMBER, "Recent:");
        for (i, name) in RECENT_PROJECTS.iter().enumerate() {
            page.write_line(5 + i as u8, Rgb565::LIGHT_GRAY, format_args!("- {}", name));
        }
    }

    fn layout_ai(&mut self, t: &TelemetrySnapshot) {
        let page = &mut self.page;
        for (i, (name, role, online)) in AGENTS.iter().enumerate() {
            let color = if i % 2 == 0 {
                Rgb565::ELECTRIC_BLUE
            } else {
                Rgb565::AMBER
            };
            let state = if *online { "online" } else { "busy" };
            page.write_line(
                i as u8,
                color,
                format_args!("{:<9} {:<12} {}", name, role, state),
            );
        }

        page.write_line(
            9,
            Rgb565::WHITE,
            format_args!("Active: {} agents", format_count(t.agent_count)),
        );
        page.write_line(
            10,
            Rgb565::WHITE,
            format_args!(
                "Online: {} / {}",
                format_count(t.active_agents),
                format_count(t.agent_count)
            ),
        );
    }

    fn layout_finance(&mut self, t: &TelemetrySnapshot) {
        let page = &mut self.page;
        page.write_line(
            0,
            Rgb565::AMBER,
            format_args!("RoadCoin ${:.4}", t.road_coin_price),
        );
        page.write_line(
            1,
            indicator_color(t.road_coin_change_24h >= 0.0),
            format_args!("24h {}", format_change(t.road_coin_change_24h)),
        );

        page.set_line(3, Rgb565::WHITE, "Your Holdings:");
        for (i, (text, color)) in HOLDINGS.iter().enumerate() {
            page.set_line(4 + i as u8, *color, text);
        }
    }

    fn layout_studio(&mut self) {
        let page = &mut self.page;
        for (i, studio) in STUDIOS.iter().enumerate() {
            page.write_line(
                i as u8,
                studio.color,
                format_args!("{} - {}", studio.name, studio.kind),
            );
        }
        page.set_line(8, Rgb565::LIGHT_GRAY, "\"Creating beauty from chaos\"");
    }

    fn layout_settings(&mut self) {
        let link = self.link;
        let page = &mut self.page;
        page.clear_lines();

        page.set_line(0, Rgb565::WHITE, "Network:");
        page.write_line(
            1,
            indicator_color(link.network_joined),
            format_args!("WiFi: {}", connected_label(link.network_joined)),
        );
        page.write_line(
            2,
            Rgb565::ELECTRIC_BLUE,
            format_args!("SSID: {}", self.ssid),
        );
        page.write_line(
            3,
            indicator_color(link.server_connected()),
            format_args!("WebSocket: {}", connected_label(link.server_connected())),
        );
        page.write_line(
            4,
            Rgb565::ELECTRIC_BLUE,
            format_args!(
                "Server: {}:{}{}",
                self.server.host, self.server.port, self.server.path
            ),
        );

        page.set_line(6, Rgb565::WHITE, "System:");
        page.write_line(
            7,
            Rgb565::LIGHT_GRAY,
            format_args!("Firmware: v{}", env!("CARGO_PKG_VERSION")),
        );
        page.set_line(8, Rgb565::LIGHT_GRAY, "Board: RP2040");
    }
}

impl Renderer for PanelRenderer {
    type Error = Infallible;

    fn redraw(
        &mut self,
        screen: Screen,
        telemetry: &TelemetrySnapshot,
        notifications: &[&Notification],
    ) -> Result<(), Infallible> {
        self.page.clear();
        self.page.screen = screen;

        match screen {
            Screen::Home => self.layout_home(telemetry),
            Screen::Projects => self.layout_projects(telemetry),
            Screen::Ai => self.layout_ai(telemetry),
            Screen::Finance => self.layout_finance(telemetry),
            Screen::Studio => self.layout_studio(),
            Screen::Settings => self.layout_settings(),
        }

        for notification in notifications.iter().take(MAX_VISIBLE_NOTIFICATIONS) {
            let _ = self.page.notices.push(Notice {
                color: notification.severity.color(),
                text: notification.message.clone(),
            });
        }

        self.page_changed = true;
        Ok(())
    }

    fn draw_status(&mut self, status: LinkStatus, uptime_s: u32) -> Result<(), Infallible> {
        let previous = core::mem::replace(&mut self.link, status);

        // The settings body mirrors the link indicators
        if self.page.screen == Screen::Settings && previous != status {
            self.layout_settings();
            self.page_changed = true;
        }

        self.status = Some(StatusBar::new(status, uptime_s));
        Ok(())
    }
}
