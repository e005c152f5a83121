//! Engine handle and driver task
//!
//! `LiveChart` is the public lifecycle surface (`seed`/`start`/`stop`). Each
//! `start` spawns one driver task that serializes the four cooperating loops
//! over the shared session:
//!
//! ```text
//! ┌────────────────────────── driver task ──────────────────────────┐
//! │  tokio::select! over:                                           │
//! │   - single-shot poll deadline  -> fetch + apply_snapshot        │
//! │   - frame interval (animating) -> animation_step                │
//! │   - micro-tick interval        -> micro_tick                    │
//! │   - visibility channel         -> pause / resume                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session lives in `Arc<Mutex<..>>` shared with the handle, so `seed`
//! and `stop` act synchronously and cannot race the driver: `stop()` snaps
//! and deactivates under the lock before aborting the task, which is why no
//! frame can ever follow its return.

use crate::core::config::EngineConfig;
use crate::core::session::Session;
use crate::traits::provider::{OhlcRange, SnapshotProvider};
use crate::traits::sink::{ModeProvider, SeriesSink};
use crate::traits::visibility::VisibilitySignal;
use crate::core::candle::Candle;
use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// The fixed range every live poll requests; only the last candle is used.
const POLL_RANGE: OhlcRange = OhlcRange::OneDay;

/// Live chart engine
///
/// Owns at most one live session at a time. `start` is idempotent: it always
/// fully stops the previous session first, so rapid symbol switches can never
/// leave an orphaned driver emitting into a stale renderer.
pub struct LiveChart {
    cfg: EngineConfig,
    provider: Arc<dyn SnapshotProvider>,
    visibility: Arc<dyn VisibilitySignal>,
    session: Arc<Mutex<Session>>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl LiveChart {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        visibility: Arc<dyn VisibilitySignal>,
        cfg: EngineConfig,
    ) -> Self {
        let session = Arc::new(Mutex::new(Session::new(cfg.clone())));
        Self {
            cfg,
            provider,
            visibility,
            session,
            driver: Mutex::new(None),
        }
    }

    /// Install historical context without animating
    ///
    /// Safe to call at any time; an in-flight transition is snapped first.
    pub fn seed(&self, candles: &[Candle]) {
        self.session.lock().seed(candles);
    }

    /// Go live for `symbol`, pushing frames through `sink`
    ///
    /// Must be called within a tokio runtime. A disabled engine ignores the
    /// call entirely.
    pub fn start(
        &self,
        symbol: &str,
        sink: Arc<dyn SeriesSink>,
        mode: Arc<dyn ModeProvider>,
    ) {
        if !self.cfg.enabled {
            debug!("live chart disabled, ignoring start for {symbol}");
            return;
        }

        // Always stop first: fast symbol switches must not leave a previous
        // driver pointed at the old renderer.
        self.stop();

        self.session.lock().activate(symbol, sink, mode);

        let handle = tokio::spawn(run_driver(
            Arc::clone(&self.session),
            Arc::clone(&self.provider),
            self.visibility.subscribe(),
            self.cfg.clone(),
        ));
        *self.driver.lock() = Some(handle);

        info!("live chart session started for {symbol}");
    }

    /// Tear down the live session
    ///
    /// Snaps any in-flight transition (its final frame is emitted before
    /// this returns), cancels the driver, and leaves the session inert and
    /// restartable.
    pub fn stop(&self) {
        let handle = self.driver.lock().take();
        if let Some(handle) = &handle {
            handle.abort();
        }

        let mut session = self.session.lock();
        if session.is_active() {
            info!("live chart session stopped for {}", session.symbol());
        }
        session.shutdown();
    }
}

impl Drop for LiveChart {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One driver per started session; aborted by `stop`
async fn run_driver(
    session: Arc<Mutex<Session>>,
    provider: Arc<dyn SnapshotProvider>,
    mut vis_rx: watch::Receiver<bool>,
    cfg: EngineConfig,
) {
    let mut ticker = time::interval_at(Instant::now() + cfg.tick_interval(), cfg.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames =
        time::interval_at(Instant::now() + cfg.frame_interval(), cfg.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Single-shot deadline, re-armed exactly once per poll attempt so cadence
    // changes take effect on the very next cycle.
    let mut poll_at = Instant::now() + session.lock().poll_interval();

    let mut visible = *vis_rx.borrow();
    let mut vis_open = true;

    loop {
        if !visible {
            // Hidden: every timer is parked; only the visibility channel can
            // wake us up again.
            if vis_rx.changed().await.is_err() {
                debug!("visibility signal dropped while hidden, driver exiting");
                return;
            }
            visible = *vis_rx.borrow();
            if visible {
                debug!("surface visible again, polling immediately");
                poll_at = Instant::now();
                ticker.reset();
            }
            continue;
        }

        let animating = session.lock().is_animating();

        tokio::select! {
            _ = time::sleep_until(poll_at) => {
                let (symbol, active) = {
                    let s = session.lock();
                    (s.symbol().to_string(), s.is_active())
                };
                if !active {
                    return;
                }

                match provider.fetch(&symbol, POLL_RANGE).await {
                    Ok(snapshot) => {
                        let mut s = session.lock();
                        if !s.is_active() {
                            return;
                        }
                        s.apply_snapshot(&snapshot, Instant::now());
                        poll_at = Instant::now() + s.poll_interval();
                    }
                    Err(err) => {
                        // Failures are absorbed: back off and retry.
                        warn!("snapshot fetch for {symbol} failed: {err}");
                        let mut s = session.lock();
                        s.poll_failed();
                        poll_at = Instant::now() + s.poll_interval();
                    }
                }
            }

            _ = frames.tick(), if animating => {
                session.lock().animation_step(Instant::now());
            }

            _ = ticker.tick() => {
                let noise = rand::thread_rng().gen_range(-1.0..=1.0);
                session.lock().micro_tick(noise);
            }

            changed = vis_rx.changed(), if vis_open => {
                match changed {
                    Ok(()) => {
                        visible = *vis_rx.borrow();
                        if !visible {
                            debug!("surface hidden, suspending live chart work");
                            // Freeze on ground truth rather than a half-run
                            // animation.
                            session.lock().snap_transition();
                        }
                    }
                    Err(_) => {
                        // Signal source gone: stay visible forever.
                        vis_open = false;
                    }
                }
            }
        }
    }
}
