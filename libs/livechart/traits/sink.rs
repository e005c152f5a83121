use crate::core::candle::{ChartMode, Frame};

/// Where rendered frames go
///
/// The sink is externally owned; the engine only ever calls `update` and
/// never mutates renderer state directly. Updates arrive from the driver
/// task, already projected per the current [`ModeProvider`], and should be
/// cheap (push to a channel, mark dirty, draw).
pub trait SeriesSink: Send + Sync {
    fn update(&self, frame: Frame);
}

/// A sink that drops every frame
///
/// Useful as a placeholder while the real renderer is not ready yet.
pub struct NullSink;

impl SeriesSink for NullSink {
    fn update(&self, _frame: Frame) {}
}

/// How the host currently wants frames projected
///
/// Read at every emission, so a host can flip between line and candlestick
/// rendering mid-session without restarting the engine.
pub trait ModeProvider: Send + Sync {
    fn current_mode(&self) -> ChartMode;
}

/// A mode provider pinned to one mode
pub struct FixedMode(pub ChartMode);

impl ModeProvider for FixedMode {
    fn current_mode(&self) -> ChartMode {
        self.0
    }
}
