//! Canonical telemetry state

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use roadhub_protocol::TelemetryUpdate;

use super::snapshot::{percent_from_f32, TelemetrySnapshot};

/// Bounds for the simulated 24 h change, percent
const SIM_CHANGE_MIN: f32 = -10.0;
const SIM_CHANGE_MAX: f32 = 20.0;

/// Owner of the displayed metrics
#[derive(Debug, Clone)]
pub struct TelemetryStore {
    snapshot: TelemetrySnapshot,
    rng: SmallRng,
    dirty: bool,
}

impl TelemetryStore {
    /// Start from the boot defaults; `seed` drives the simulator
    pub fn new(seed: u64) -> Self {
        Self {
            snapshot: TelemetrySnapshot::default(),
            rng: SmallRng::seed_from_u64(seed),
            dirty: false,
        }
    }

    /// Copy of the current values
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.snapshot
    }

    /// Merge a sparse remote update
    ///
    /// Only the fields present in `update` are written. Percentages are
    /// clamped to `0..=100`. Returns false (and leaves the store clean) when
    /// the update carried no known field.
    pub fn apply_remote_update(&mut self, update: &TelemetryUpdate) -> bool {
        if update.is_empty() {
            return false;
        }

        let s = &mut self.snapshot;
        if let Some(v) = update.project_count {
            s.project_count = v;
        }
        if let Some(v) = update.agent_count {
            s.agent_count = v;
        }
        if let Some(v) = update.road_coin_price {
            s.road_coin_price = v;
        }
        if let Some(v) = update.road_coin_change_24h {
            s.road_coin_change_24h = v;
        }
        if let Some(v) = update.cpu_usage_pct {
            s.cpu_usage_pct = percent_from_f32(v);
        }
        if let Some(v) = update.mem_usage_pct {
            s.mem_usage_pct = percent_from_f32(v);
        }
        if let Some(v) = update.network_bytes_per_sec {
            s.network_bytes_per_sec = v;
        }

        self.dirty = true;
        true
    }

    /// Advance every field by a bounded pseudo-random step
    ///
    /// Counts drift upward with small dips and saturate at zero. The price
    /// moves by at most one cent and never goes negative. Usage and traffic
    /// figures are redrawn within plausible ranges.
    pub fn apply_simulation_step(&mut self) {
        let rng = &mut self.rng;
        let s = &mut self.snapshot;

        s.project_count = s.project_count.saturating_add_signed(rng.gen_range(-10..50));
        s.agent_count = s.agent_count.saturating_add_signed(rng.gen_range(-5..20));
        s.active_agents = s
            .active_agents
            .saturating_add_signed(rng.gen_range(-2..=2))
            .min(s.agent_count);

        let price_step = rng.gen_range(-100i32..100) as f32 / 10_000.0;
        s.road_coin_price = (s.road_coin_price + price_step).max(0.0);
        s.road_coin_change_24h = (rng.gen_range(-1000i32..2000) as f32 / 100.0)
            .clamp(SIM_CHANGE_MIN, SIM_CHANGE_MAX);

        s.cpu_usage_pct = rng.gen_range(20..90);
        s.mem_usage_pct = rng.gen_range(30..85);
        s.network_bytes_per_sec = rng.gen_range(100..5000);

        self.dirty = true;
    }

    /// Check if the snapshot changed since the last redraw
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}
