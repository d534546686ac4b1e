//! Metrics payloads exchanged with the server over the bridge session
//!
//! Inbound frames are flat JSON objects carrying any subset of the known
//! keys. Each present key replaces the matching field on the hub; absent
//! keys (or `null`) leave the field alone. Unknown keys are ignored so the
//! server can grow its payload without breaking older panels.

use serde::{Deserialize, Deserializer};

/// Subscribe request sent once the session opens
pub const SUBSCRIBE_METRICS: &str = r#"{"type":"subscribe","channel":"metrics"}"#;

/// Metrics pull request sent on a fixed cadence while connected
pub const GET_METRICS: &str = r#"{"type":"getMetrics"}"#;

/// Sparse metrics update
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryUpdate {
    #[serde(rename = "projects", default, deserialize_with = "count")]
    pub project_count: Option<u32>,
    #[serde(rename = "agents", default, deserialize_with = "count")]
    pub agent_count: Option<u32>,
    #[serde(rename = "roadcoin")]
    pub road_coin_price: Option<f32>,
    #[serde(rename = "change24h")]
    pub road_coin_change_24h: Option<f32>,
    #[serde(rename = "cpu")]
    pub cpu_usage_pct: Option<f32>,
    #[serde(rename = "memory")]
    pub mem_usage_pct: Option<f32>,
    #[serde(rename = "network", default, deserialize_with = "count")]
    pub network_bytes_per_sec: Option<u32>,
}

impl TelemetryUpdate {
    /// True when no known key was present
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Counts arrive as any JSON number; fractions truncate and out-of-range
/// values saturate to the `u32` range
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v as u32))
}

/// Reasons a frame could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload is not a JSON object
    NotAnObject,
    /// Invalid JSON syntax
    Syntax,
    /// A known key carried a value of the wrong type or range
    Data,
    /// Payload ended in the middle of a value
    Truncated,
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match e.classify() {
            Category::Eof => DecodeError::Truncated,
            Category::Data => DecodeError::Data,
            Category::Syntax | Category::Io => DecodeError::Syntax,
        }
    }
}

/// Decode a text frame into a sparse update
///
/// Either the whole frame decodes or nothing does; a frame with one bad
/// value yields an error rather than a partial update.
pub fn decode_update(text: &str) -> Result<TelemetryUpdate, DecodeError> {
    if !text.trim_start().starts_with('{') {
        return Err(DecodeError::NotAnObject);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_update() {
        let update = decode_update(
            r#"{"projects":30300,"agents":15900,"roadcoin":0.45,"change24h":-1.5,
                "cpu":42,"memory":61.5,"network":2048}"#,
        )
        .unwrap();

        assert_eq!(update.project_count, Some(30300));
        assert_eq!(update.agent_count, Some(15900));
        assert_eq!(update.road_coin_price, Some(0.45));
        assert_eq!(update.road_coin_change_24h, Some(-1.5));
        assert_eq!(update.cpu_usage_pct, Some(42.0));
        assert_eq!(update.mem_usage_pct, Some(61.5));
        assert_eq!(update.network_bytes_per_sec, Some(2048));
    }

    #[test]
    fn test_decode_sparse_update() {
        let update = decode_update(r#"{"cpu":30}"#).unwrap();
        assert_eq!(update.cpu_usage_pct, Some(30.0));
        assert_eq!(update.mem_usage_pct, None);
        assert!(!update.is_empty());
    }

    #[test]
    fn test_unknown_keys_and_nulls_ignored() {
        let update = decode_update(r#"{"type":"metrics","cpu":null,"uptime":12}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_wrong_type_rejects_whole_frame() {
        assert_eq!(
            decode_update(r#"{"cpu":10,"projects":"lots"}"#),
            Err(DecodeError::Data)
        );
    }

    #[test]
    fn test_fractional_counts_merge() {
        let update = decode_update(r#"{"network":1536.7,"cpu":42}"#).unwrap();
        assert_eq!(update.network_bytes_per_sec, Some(1536));
        assert_eq!(update.cpu_usage_pct, Some(42.0));

        let update = decode_update(r#"{"projects":-4,"agents":1e12}"#).unwrap();
        assert_eq!(update.project_count, Some(0));
        assert_eq!(update.agent_count, Some(u32::MAX));
    }

    #[test]
    fn test_malformed_frames() {
        assert_eq!(decode_update("not json"), Err(DecodeError::NotAnObject));
        assert_eq!(decode_update("[1,2,3]"), Err(DecodeError::NotAnObject));
        assert_eq!(decode_update(r#"{"cpu":"#), Err(DecodeError::Truncated));
        assert_eq!(decode_update(r#"{"cpu" 1}"#), Err(DecodeError::Syntax));
    }

    #[test]
    fn test_control_payloads_are_json_objects() {
        assert!(SUBSCRIBE_METRICS.starts_with('{'));
        assert!(GET_METRICS.contains("getMetrics"));
    }
}
