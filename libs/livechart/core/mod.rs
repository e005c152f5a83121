pub mod candle;
pub mod config;
pub mod engine;
pub mod math;
pub mod session;

pub use candle::{Candle, ChartMode, Frame};
pub use config::EngineConfig;
pub use engine::LiveChart;
pub use session::Session;
