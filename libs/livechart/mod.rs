//! # LiveChart
//!
//! A client-side simulation engine that turns sparse OHLC snapshots into a
//! continuously updating chart feed.
//!
//! The backend only serves one candle per request, every 10-60 seconds. This
//! engine makes the chart feel live anyway by coordinating four cooperative
//! loops around one owned session:
//!
//! - **Adaptive polling**: fetch cadence is a function of observed volatility
//! - **Smooth transitions**: eased interpolation from the displayed close to
//!   each newly received close
//! - **Micro-ticks**: small mean-reverting noise frames between real updates
//! - **Visibility gating**: everything suspends while the surface is hidden
//!
//! All external collaborators are injected trait objects: the snapshot
//! provider, the renderer sink, the chart-mode accessor, and the visibility
//! signal. See [`traits`] for the seams and [`client`] for the bundled HTTP
//! provider.

pub mod client;
pub mod core;
pub mod logging;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core engine types
pub use core::{Candle, ChartMode, EngineConfig, Frame, LiveChart};

// Re-export the bundled HTTP provider
pub use client::MarketApiClient;

pub use logging::init_tracing;
