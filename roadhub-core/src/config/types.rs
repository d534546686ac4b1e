//! Configuration type definitions

use heapless::String;

/// Maximum SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA passphrase length
pub const MAX_PASSWORD_LEN: usize = 64;

/// Maximum server host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum WebSocket path length
pub const MAX_PATH_LEN: usize = 32;

/// Network credentials handed to the network interface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Credentials {
    pub ssid: String<MAX_SSID_LEN>,
    pub password: String<MAX_PASSWORD_LEN>,
}

/// Telemetry server location
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Endpoint {
    pub host: String<MAX_HOST_LEN>,
    pub port: u16,
    pub path: String<MAX_PATH_LEN>,
}

impl Default for Endpoint {
    fn default() -> Self {
        let mut host = String::new();
        let mut path = String::new();
        // Both literals are shorter than their capacity
        let _ = host.push_str("192.168.4.74");
        let _ = path.push_str("/ws");
        Self {
            host,
            port: 8080,
            path,
        }
    }
}

/// Touch gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureConfig {
    /// Minimum spacing between accepted press samples
    pub debounce_ms: u32,
    /// Horizontal travel a swipe must exceed
    pub swipe_threshold_px: u16,
    /// Top edge of the navigation bar band
    pub navbar_top_px: u16,
    /// Width of one navigation button
    pub nav_button_width_px: u16,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            swipe_threshold_px: 80,
            navbar_top_px: 290,
            nav_button_width_px: 40,
        }
    }
}

/// Link lifecycle timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Join status checks before giving up
    pub join_attempts: u8,
    /// Spacing between join status checks
    pub join_retry_ms: u32,
    /// Wait after a failed join before trying again
    pub rejoin_cooldown_ms: u32,
    /// Metrics pull cadence while connected
    pub metrics_interval_ms: u32,
    /// Local simulation cadence while not connected
    pub simulation_interval_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            join_attempts: 20,
            join_retry_ms: 500,
            rejoin_cooldown_ms: 30_000,
            metrics_interval_ms: 5_000,
            simulation_interval_ms: 10_000,
        }
    }
}

/// Notification behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotificationConfig {
    /// Age after which a notification is dropped
    pub expiry_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { expiry_ms: 5_000 }
    }
}

/// Complete hub configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HubConfig {
    pub network: Credentials,
    pub server: Endpoint,
    pub gesture: GestureConfig,
    pub link: LinkConfig,
    pub notifications: NotificationConfig,
}

impl HubConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }
}
