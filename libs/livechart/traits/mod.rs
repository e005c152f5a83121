//! # LiveChart Traits
//!
//! The seams between the engine and everything it does not own:
//!
//! - **SnapshotProvider**: where candles come from
//! - **SeriesSink**: where frames go
//! - **ModeProvider**: how frames are projected (line vs candlestick)
//! - **VisibilitySignal**: when to suspend all work
//!
//! Each seam ships a trivial implementation next to the trait, so hosts only
//! implement what they actually customize.

pub mod error;
pub mod provider;
pub mod sink;
pub mod visibility;

// Re-export commonly used types
pub use error::{LiveChartError, Result};
pub use provider::{EmptyProvider, OhlcRange, Snapshot, SnapshotProvider};
pub use sink::{FixedMode, ModeProvider, NullSink, SeriesSink};
pub use visibility::{AlwaysVisible, ManualVisibility, VisibilitySignal};
