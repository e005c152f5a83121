//! Session state machine
//!
//! The synchronous heart of the engine: one `Session` owns everything a live
//! subscription needs (committed candle, cadence, drift, transition state,
//! renderer accessors). The async driver only decides *when* to call in;
//! every rule about *what* happens lives here, which keeps all of it
//! unit-testable without timers.
//!
//! # Invariants
//!
//! - At most one of {transition, micro-tick} emits at any instant: the
//!   micro-tick path bails while a transition is in flight.
//! - `tick_drift` is reset whenever a candle commits; drift only ever
//!   measures noise since the last ground-truth value.
//! - A cancelled transition is never left half-applied: cancellation snaps
//!   to the target, commits it, and emits the final frame.

use crate::core::candle::{Candle, ChartMode, Frame};
use crate::core::config::EngineConfig;
use crate::core::math::{compute_poll_interval, compute_volatility, ease_out_cubic, lerp};
use crate::traits::provider::Snapshot;
use crate::traits::sink::{ModeProvider, SeriesSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// In-flight close-price transition
#[derive(Debug, Clone, Copy)]
struct Transition {
    from: f64,
    target: Candle,
    started_at: Instant,
}

/// Live mutable state of one chart subscription
pub struct Session {
    cfg: EngineConfig,
    symbol: String,
    sink: Option<Arc<dyn SeriesSink>>,
    mode: Option<Arc<dyn ModeProvider>>,

    last_candle: Option<Candle>,
    reference_close: f64,
    poll_interval: Duration,
    tick_drift: f64,
    active: bool,
    transition: Option<Transition>,
}

impl Session {
    /// Create an inert session; `activate` brings it live
    pub fn new(cfg: EngineConfig) -> Self {
        let poll_interval = cfg.max_poll();
        Self {
            cfg,
            symbol: String::new(),
            sink: None,
            mode: None,
            last_candle: None,
            reference_close: 0.0,
            poll_interval,
            tick_drift: 0.0,
            active: false,
            transition: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn last_candle(&self) -> Option<Candle> {
        self.last_candle
    }

    /// Bind accessors and mark the session live
    pub fn activate(
        &mut self,
        symbol: &str,
        sink: Arc<dyn SeriesSink>,
        mode: Arc<dyn ModeProvider>,
    ) {
        self.symbol = symbol.to_string();
        self.sink = Some(sink);
        self.mode = Some(mode);
        self.active = true;
    }

    /// Synchronous reset used for cold starts and symbol switches
    ///
    /// Installs the last candle (if any) as committed history without
    /// animating, and drops the cadence back to the slowest setting.
    pub fn seed(&mut self, candles: &[Candle]) {
        self.snap_transition();
        self.tick_drift = 0.0;
        self.poll_interval = self.cfg.max_poll();

        match candles.last().copied() {
            Some(candle) => {
                self.last_candle = Some(candle);
                self.reference_close = candle.close;
                debug!("seeded session at close {}", candle.close);
            }
            None => {
                self.last_candle = None;
                self.reference_close = 0.0;
            }
        }
    }

    /// Apply one poll result
    ///
    /// Empty snapshots leave the cadence untouched (the network worked, the
    /// backend just has nothing yet). Otherwise the last candle drives a
    /// cadence update and a new transition. The volatility computation is
    /// skipped entirely for the very first candle: there is no reference to
    /// compare against, so the first commit never changes cadence.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot, now: Instant) {
        if !self.active {
            return;
        }
        let Some(new_candle) = snapshot.candles.last().copied() else {
            return;
        };

        if self.last_candle.is_some() {
            let volatility = compute_volatility(new_candle.close, self.reference_close);
            self.poll_interval = compute_poll_interval(volatility, &self.cfg);
            debug!(
                "volatility {:.4}% -> poll every {}ms",
                volatility,
                self.poll_interval.as_millis()
            );
        }

        // Reference moves to the new close immediately, even though the
        // visual transition to it has only just started.
        self.reference_close = new_candle.close;
        self.begin_transition(new_candle, now);
    }

    /// Network or backend failure: back off to the slowest cadence
    pub fn poll_failed(&mut self) {
        self.poll_interval = self.cfg.max_poll();
    }

    /// Start animating toward `target`, snapping any transition in flight
    fn begin_transition(&mut self, target: Candle, now: Instant) {
        self.snap_transition();

        let from = self.last_candle.map(|c| c.close).unwrap_or(target.close);
        self.transition = Some(Transition {
            from,
            target,
            started_at: now,
        });
    }

    /// Advance the in-flight transition by one frame
    ///
    /// Intermediate frames pin time/open/high/low to the target candle and
    /// interpolate only the close. At `t >= 1` the target commits exactly.
    pub fn animation_step(&mut self, now: Instant) {
        let Some(tr) = self.transition else {
            return;
        };

        let elapsed = now.saturating_duration_since(tr.started_at);
        let t = (elapsed.as_secs_f64() / self.cfg.transition().as_secs_f64()).min(1.0);

        if t < 1.0 {
            let eased = ease_out_cubic(t);
            let close = lerp(tr.from, tr.target.close, eased);
            self.emit(Candle { close, ..tr.target });
        } else {
            self.transition = None;
            self.commit(tr.target);
        }
    }

    /// Finalize any in-flight transition immediately
    ///
    /// Cancellation contract: the target still commits and the final frame
    /// still goes out, so a preempted or interrupted transition is never
    /// visible as a half-applied value.
    pub fn snap_transition(&mut self) {
        if let Some(tr) = self.transition.take() {
            debug!("snapping in-flight transition to close {}", tr.target.close);
            self.commit(tr.target);
        }
    }

    /// Commit `target` as ground truth and emit it verbatim
    fn commit(&mut self, target: Candle) {
        self.last_candle = Some(target);
        self.tick_drift = 0.0;
        self.emit(target);
    }

    /// Synthesize one noise frame on top of the committed candle
    ///
    /// `unit_noise` is a uniform draw in `[-1, 1]`; the caller owns the RNG
    /// so any draw can be exercised deterministically. Skipped while a
    /// transition is animating, before the first commit, and for flat
    /// candles. Never mutates the committed candle.
    pub fn micro_tick(&mut self, unit_noise: f64) {
        if self.transition.is_some() {
            return;
        }
        let Some(candle) = self.last_candle else {
            return;
        };
        if candle.is_flat() {
            return;
        }

        let noise = unit_noise * self.cfg.tick_noise_ratio * candle.range();
        self.tick_drift = self.tick_drift * (1.0 - self.cfg.tick_mean_reversion) + noise;

        let close = (candle.close + self.tick_drift).clamp(candle.low, candle.high);
        self.emit(Candle { close, ..candle });
    }

    /// Tear the session down to an inert, restartable state
    ///
    /// Snaps any in-flight transition (emitting its final frame) before the
    /// accessors are dropped, then clears them.
    pub fn shutdown(&mut self) {
        self.active = false;
        self.snap_transition();
        self.sink = None;
        self.mode = None;
        self.symbol.clear();
    }

    /// Single emission point: project per the current mode and push
    ///
    /// A missing sink means the renderer is not ready; the frame is dropped
    /// silently. A missing mode accessor falls back to line projection.
    fn emit(&self, candle: Candle) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let mode = self
            .mode
            .as_ref()
            .map(|m| m.current_mode())
            .unwrap_or(ChartMode::Line);
        sink.update(Frame::project(candle, mode));
    }
}
