//! Live chart feed demo
//!
//! Seeds the engine with recent history, then streams live frames to the
//! terminal: eased transitions on every fresh snapshot, synthetic
//! micro-ticks in between.
//!
//! Usage:
//!   cargo run --bin chart_feed
//!
//! Optional environment:
//!   CONFIG_PATH         path to config.yaml
//!   MARKET_API_URL      override the OHLC endpoint
//!   COINGECKO_API_KEY   demo API key (lifts anonymous rate limits)

use anyhow::Result;
use chrono::Utc;
use livechart::{
    AlwaysVisible, FixedMode, Frame, LiveChart, MarketApiClient, SeriesSink, Snapshot,
    SnapshotProvider,
};
use livechart_bot::bin_common::{load_config_from_env, ConfigType};
use livechart_bot::config::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Sink that prints every frame with a wall-clock timestamp
struct TerminalSink;

impl SeriesSink for TerminalSink {
    fn update(&self, frame: Frame) {
        let now = Utc::now().format("%H:%M:%S%.3f");
        match frame {
            Frame::Ohlc(c) => println!(
                "[{now}] t={} o={:.2} h={:.2} l={:.2} c={:.4}",
                c.time, c.open, c.high, c.low, c.close
            ),
            Frame::Point { time, value } => println!("[{now}] t={time} v={value:.4}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    livechart::init_tracing();

    let config_path = load_config_from_env(ConfigType::App);
    let config = AppConfig::load(&config_path)?;

    let provider = Arc::new(MarketApiClient::from_env()?);

    // Historical context first, so the chart has something to breathe on
    // before the first live poll lands.
    let seed = match provider
        .fetch(&config.market.coin_id, config.market.seed_range)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!("initial snapshot failed, starting cold: {err}");
            Snapshot::default()
        }
    };

    let engine = LiveChart::new(
        provider,
        Arc::new(AlwaysVisible::new()),
        config.engine.clone(),
    );
    engine.seed(&seed.candles);
    engine.start(
        &config.market.coin_id,
        Arc::new(TerminalSink),
        Arc::new(FixedMode(config.market.mode)),
    );

    println!("════════════════════════════════════════════════════════════════");
    println!("Live chart feed: {} ({:?} mode)", config.market.coin_id, config.market.mode);
    println!("Seeded {} candles. Press Ctrl+C to stop", seed.candles.len());
    println!("════════════════════════════════════════════════════════════════");

    tokio::signal::ctrl_c().await?;
    engine.stop();
    println!("stopped");

    Ok(())
}
