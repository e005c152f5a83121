use crate::core::candle::Candle;
use crate::traits::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Supported OHLC lookback ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OhlcRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "365d")]
    OneYear,
}

impl Default for OhlcRange {
    fn default() -> Self {
        OhlcRange::SevenDays
    }
}

impl OhlcRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            OhlcRange::OneDay => "1d",
            OhlcRange::SevenDays => "7d",
            OhlcRange::ThirtyDays => "30d",
            OhlcRange::NinetyDays => "90d",
            OhlcRange::OneYear => "365d",
        }
    }

    /// Lookback in days, as OHLC providers expect it
    pub fn days(&self) -> u32 {
        match self {
            OhlcRange::OneDay => 1,
            OhlcRange::SevenDays => 7,
            OhlcRange::ThirtyDays => 30,
            OhlcRange::NinetyDays => 90,
            OhlcRange::OneYear => 365,
        }
    }
}

/// One provider response: recent candles, chronological, oldest first
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub candles: Vec<Candle>,
}

/// Where snapshots come from
///
/// Implementations must be idempotent reads; the engine tolerates cached or
/// delayed results and only ever consumes the last candle of a snapshot.
/// Rate limiting and generic failures are distinct variants but the poll
/// scheduler treats them identically: back off and retry.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn fetch(&self, symbol: &str, range: OhlcRange) -> Result<Snapshot>;
}

/// A provider that always succeeds with no data
///
/// Leaves the engine idling at the slowest cadence; handy for wiring up a
/// chart surface before a real data source exists.
pub struct EmptyProvider;

#[async_trait]
impl SnapshotProvider for EmptyProvider {
    async fn fetch(&self, _symbol: &str, _range: OhlcRange) -> Result<Snapshot> {
        Ok(Snapshot::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_roundtrip_names_and_days() {
        for (range, name, days) in [
            (OhlcRange::OneDay, "1d", 1),
            (OhlcRange::SevenDays, "7d", 7),
            (OhlcRange::ThirtyDays, "30d", 30),
            (OhlcRange::NinetyDays, "90d", 90),
            (OhlcRange::OneYear, "365d", 365),
        ] {
            assert_eq!(range.as_str(), name);
            assert_eq!(range.days(), days);
        }
    }

    #[test]
    fn test_range_deserializes_from_wire_names() {
        let range: OhlcRange = serde_json::from_str(r#""30d""#).unwrap();
        assert_eq!(range, OhlcRange::ThirtyDays);
    }
}
