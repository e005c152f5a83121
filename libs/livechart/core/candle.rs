//! Candle value type and the renderer-facing frame projection.

use serde::{Deserialize, Serialize};

/// A single OHLC candle
///
/// `time` is unix seconds (the bucket start). Candles received from a
/// provider are never mutated; the engine only derives new ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Price range covered by this candle
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// A degenerate candle with no room to move
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.range() <= 0.0
    }
}

/// How emitted frames are projected for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Line,
    Candlestick,
}

/// One renderer update
///
/// Every emitting path (transition frames, micro-ticks, final snaps) goes
/// through the same projection, so a sink only ever sees one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Full OHLC update (candlestick mode)
    Ohlc(Candle),
    /// Reduced close-only update (line mode)
    Point { time: i64, value: f64 },
}

impl Frame {
    /// Project a candle into the frame shape the current mode expects
    pub fn project(candle: Candle, mode: ChartMode) -> Self {
        match mode {
            ChartMode::Candlestick => Frame::Ohlc(candle),
            ChartMode::Line => Frame::Point {
                time: candle.time,
                value: candle.close,
            },
        }
    }

    /// The close/value carried by this frame
    pub fn value(&self) -> f64 {
        match self {
            Frame::Ohlc(candle) => candle.close,
            Frame::Point { value, .. } => *value,
        }
    }
}
