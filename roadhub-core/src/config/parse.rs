//! Minimal TOML parser for `hub.toml`
//!
//! Handles only the subset the hub configuration needs. It does NOT support
//! the full TOML spec.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (strings and integers)
//! - Comments (`# ...`), including trailing ones
//!
//! NOT supported:
//! - Arrays, inline tables, dotted keys
//! - Multi-line or escaped strings

use heapless::String;

use super::types::HubConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// String longer than its field allows
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Network,
    Server,
    Gesture,
    Link,
    Notifications,
}

/// Parse `hub.toml` contents on top of the default configuration
///
/// Keys that are absent keep their default. Unknown keys are ignored so a
/// newer file still loads on older firmware; unknown sections are an error.
pub fn parse_config(input: &str) -> Result<HubConfig, ParseError> {
    let mut config = HubConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_suffix(']')
                .or_else(|| strip_comment(line).strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(&header[1..])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "network" | "wifi" => Ok(Section::Network),
        "server" => Ok(Section::Server),
        "gesture" | "touch" => Ok(Section::Gesture),
        "link" => Ok(Section::Link),
        "notifications" => Ok(Section::Notifications),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment unless the `#` sits inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_bounded<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    String::try_from(parse_string(value)).map_err(|_| ParseError::TooLong)
}

/// Parse an integer value; `_` separators are allowed (`30_000`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits = String::<24>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_nonzero_u32(value: &str) -> Result<u32, ParseError> {
    match parse_int::<u32>(value)? {
        0 => Err(ParseError::InvalidValue),
        n => Ok(n),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut HubConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Network => match key {
            "ssid" => config.network.ssid = parse_bounded(value)?,
            "password" => config.network.password = parse_bounded(value)?,
            _ => {}
        },
        Section::Server => match key {
            "host" => config.server.host = parse_bounded(value)?,
            "port" => config.server.port = parse_int(value)?,
            "path" => config.server.path = parse_bounded(value)?,
            _ => {}
        },
        Section::Gesture => {
            let g = &mut config.gesture;
            match key {
                "debounce_ms" => g.debounce_ms = parse_int(value)?,
                "swipe_threshold_px" | "swipe_threshold" => {
                    g.swipe_threshold_px = parse_int(value)?
                }
                "navbar_top_px" | "navbar_top" => g.navbar_top_px = parse_int(value)?,
                "nav_button_width_px" | "nav_button_width" => {
                    g.nav_button_width_px = match parse_int(value)? {
                        0 => return Err(ParseError::InvalidValue),
                        n => n,
                    }
                }
                _ => {}
            }
        }
        Section::Link => {
            let l = &mut config.link;
            match key {
                "join_attempts" => {
                    l.join_attempts = match parse_int(value)? {
                        0 => return Err(ParseError::InvalidValue),
                        n => n,
                    }
                }
                "join_retry_ms" => l.join_retry_ms = parse_nonzero_u32(value)?,
                "rejoin_cooldown_ms" => l.rejoin_cooldown_ms = parse_int(value)?,
                "metrics_interval_ms" => l.metrics_interval_ms = parse_nonzero_u32(value)?,
                "simulation_interval_ms" => {
                    l.simulation_interval_ms = parse_nonzero_u32(value)?
                }
                _ => {}
            }
        }
        Section::Notifications => match key {
            "expiry_ms" => config.notifications.expiry_ms = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}
