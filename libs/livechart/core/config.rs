//! Engine tuning knobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Live chart engine configuration
///
/// Defaults match the production tuning; YAML/env overrides only need to
/// name the fields they change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Global feature flag; when false, `start()` is a no-op
    pub enabled: bool,

    /// Fastest polling cadence (highest observed volatility)
    pub min_poll_ms: u64,
    /// Slowest polling cadence (flat market, and the backoff on errors)
    pub max_poll_ms: u64,
    /// Volatility (percent) at or above which polling runs at `min_poll_ms`
    pub volatility_cap: f64,

    /// Duration of the eased close-price transition
    pub transition_ms: u64,
    /// Pacing of transition frames on hosts without a native frame callback
    pub frame_interval_ms: u64,

    /// Cadence of synthetic micro-ticks between transitions
    pub tick_interval_ms: u64,
    /// Noise amplitude as a fraction of the candle's high-low range
    pub tick_noise_ratio: f64,
    /// Per-tick decay applied to accumulated drift (0 = random walk, 1 = memoryless)
    pub tick_mean_reversion: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_poll_ms: 10_000,
            max_poll_ms: 60_000,
            volatility_cap: 0.5,
            transition_ms: 800,
            frame_interval_ms: 16,
            tick_interval_ms: 2_000,
            tick_noise_ratio: 0.02,
            tick_mean_reversion: 0.3,
        }
    }
}

impl EngineConfig {
    pub fn min_poll(&self) -> Duration {
        Duration::from_millis(self.min_poll_ms)
    }

    pub fn max_poll(&self) -> Duration {
        Duration::from_millis(self.max_poll_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_production_tuning() {
        let cfg = EngineConfig::default();
        assert!(cfg.enabled);
        assert_eq!(cfg.min_poll_ms, 10_000);
        assert_eq!(cfg.max_poll_ms, 60_000);
        assert!((cfg.volatility_cap - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.transition_ms, 800);
        assert_eq!(cfg.tick_interval_ms, 2_000);
        assert!((cfg.tick_noise_ratio - 0.02).abs() < f64::EPSILON);
        assert!((cfg.tick_mean_reversion - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_deserialization_falls_back_to_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"max_poll_ms": 30000}"#).unwrap();
        assert_eq!(cfg.max_poll_ms, 30_000);
        assert_eq!(cfg.min_poll_ms, 10_000);
        assert!(cfg.enabled);
    }
}
