//! Pure interpolation and cadence math.

use crate::core::config::EngineConfig;
use std::time::Duration;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-out curve: fast start, gentle landing
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Percent change between two closes
///
/// Returns 0 for a non-positive baseline, so a broken reference can never
/// produce a bogus cadence.
pub fn compute_volatility(new_close: f64, old_close: f64) -> f64 {
    if old_close <= 0.0 {
        return 0.0;
    }
    (new_close - old_close).abs() / old_close * 100.0
}

/// Map observed volatility to a polling interval
///
/// 0% change polls at `max_poll_ms`; anything at or above `volatility_cap`
/// percent polls at `min_poll_ms`; linear in between.
pub fn compute_poll_interval(volatility: f64, cfg: &EngineConfig) -> Duration {
    let t = (volatility / cfg.volatility_cap).min(1.0);
    let ms = lerp(cfg.max_poll_ms as f64, cfg.min_poll_ms as f64, t).round();
    Duration::from_millis(ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        assert!((lerp(0.0, 10.0, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((lerp(0.0, 10.0, 1.0) - 10.0).abs() < f64::EPSILON);
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ease_out_cubic_shape() {
        assert!((ease_out_cubic(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
        // Ease-out: ahead of linear in the middle
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_volatility_is_absolute_percent_change() {
        assert!((compute_volatility(101.0, 100.0) - 1.0).abs() < 1e-9);
        assert!((compute_volatility(99.0, 100.0) - 1.0).abs() < 1e-9);
        assert!((compute_volatility(100.0, 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_zero_for_non_positive_baseline() {
        assert_eq!(compute_volatility(100.0, 0.0), 0.0);
        assert_eq!(compute_volatility(100.0, -5.0), 0.0);
    }

    #[test]
    fn test_poll_interval_cadence_table() {
        let cfg = EngineConfig::default();
        // 0% -> slowest, 0.25% -> midpoint, >= cap -> fastest
        assert_eq!(compute_poll_interval(0.0, &cfg), Duration::from_millis(60_000));
        assert_eq!(compute_poll_interval(0.25, &cfg), Duration::from_millis(35_000));
        assert_eq!(compute_poll_interval(0.5, &cfg), Duration::from_millis(10_000));
        assert_eq!(compute_poll_interval(1.0, &cfg), Duration::from_millis(10_000));
    }

    #[test]
    fn test_poll_interval_monotonically_non_increasing() {
        let cfg = EngineConfig::default();
        let mut prev = compute_poll_interval(0.0, &cfg);
        let mut vol = 0.0;
        while vol <= cfg.volatility_cap {
            let next = compute_poll_interval(vol, &cfg);
            assert!(next <= prev, "interval increased at volatility {vol}");
            prev = next;
            vol += 0.01;
        }
    }

    #[test]
    fn test_poll_interval_never_leaves_bounds() {
        let cfg = EngineConfig::default();
        for vol in [0.0, 0.1, 0.49, 0.5, 2.0, 1_000.0] {
            let interval = compute_poll_interval(vol, &cfg);
            assert!(interval >= cfg.min_poll());
            assert!(interval <= cfg.max_poll());
        }
    }
}
