//! Short human-readable figures for the panel

use core::fmt::{self, Write};

use heapless::String;

/// Capacity of a formatted figure
pub const FIGURE_LEN: usize = 16;

/// Formatted figure
pub type Figure = String<FIGURE_LEN>;

/// Placeholder for figures that do not fit
const OVERFLOW: &str = "--";

/// Format into a figure, or the placeholder when the text does not fit
fn figure(args: fmt::Arguments) -> Figure {
    let mut out = Figure::new();
    if out.write_fmt(args).is_err() {
        out.clear();
        let _ = out.push_str(OVERFLOW);
    }
    out
}

/// `value / unit` in tenths, rounded half up
fn tenths(value: u32, unit: u64) -> u64 {
    (u64::from(value) * 10 + unit / 2) / unit
}

/// Scale by powers of `base`, one decimal place
///
/// The unit is chosen after rounding so `999_950` reads `1.0M`, not `1000.0K`.
fn scaled(value: u32, base: u32, suffixes: [&str; 3]) -> Figure {
    if value < base {
        return figure(format_args!("{}{}", value, suffixes[0]));
    }
    let base = u64::from(base);
    let (mut t, mut suffix) = (tenths(value, base), suffixes[1]);
    if t >= base * 10 {
        t = tenths(value, base * base);
        suffix = suffixes[2];
    }
    figure(format_args!("{}.{}{}", t / 10, t % 10, suffix))
}

/// Counts: `947`, `30.2K`, `1.5M`
pub fn format_count(value: u32) -> Figure {
    scaled(value, 1_000, ["", "K", "M"])
}

/// Byte rates: `512B`, `1.5KB`, `2.0MB`
pub fn format_bytes(value: u32) -> Figure {
    scaled(value, 1024, ["B", "KB", "MB"])
}

/// Uptime as `HH:MM:SS`; hours keep counting past 99
pub fn format_uptime(uptime_s: u32) -> Figure {
    let mut out = Figure::new();
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}",
        uptime_s / 3600,
        (uptime_s / 60) % 60,
        uptime_s % 60
    );
    out
}

/// Price with two decimals, e.g. `$0.42`
pub fn format_price(value: f32) -> Figure {
    figure(format_args!("${:.2}", value))
}

/// Signed percentage with two decimals, e.g. `+5.23%`
pub fn format_change(value: f32) -> Figure {
    figure(format_args!("{:+.2}%", value))
}
