//! Metric snapshot and value normalization

/// Everything the screens display
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    pub project_count: u32,
    pub agent_count: u32,
    pub active_agents: u32,
    /// RoadCoin price in USD
    pub road_coin_price: f32,
    /// 24 h price change, percent
    pub road_coin_change_24h: f32,
    pub cpu_usage_pct: u8,
    pub mem_usage_pct: u8,
    pub network_bytes_per_sec: u32,
}

impl Default for TelemetrySnapshot {
    /// Values shown from boot until the first update
    fn default() -> Self {
        Self {
            project_count: 30_247,
            agent_count: 15_892,
            active_agents: 47,
            road_coin_price: 0.42,
            road_coin_change_24h: 5.23,
            cpu_usage_pct: 0,
            mem_usage_pct: 0,
            network_bytes_per_sec: 0,
        }
    }
}

/// Clamp a percentage to `0..=100` and round to the nearest integer
///
/// NaN maps to 0.
pub fn percent_from_f32(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 100.0) + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_defaults() {
        let s = TelemetrySnapshot::default();
        assert_eq!(s.project_count, 30_247);
        assert_eq!(s.agent_count, 15_892);
        assert_eq!(s.active_agents, 47);
        assert_eq!(s.cpu_usage_pct, 0);
    }

    #[test]
    fn test_percent_normalization() {
        assert_eq!(percent_from_f32(42.0), 42);
        assert_eq!(percent_from_f32(42.5), 43);
        assert_eq!(percent_from_f32(42.4), 42);
        assert_eq!(percent_from_f32(150.0), 100);
        assert_eq!(percent_from_f32(-3.0), 0);
        assert_eq!(percent_from_f32(f32::NAN), 0);
        assert_eq!(percent_from_f32(f32::INFINITY), 100);
    }
}
