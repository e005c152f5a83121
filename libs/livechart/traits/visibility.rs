use tokio::sync::watch;

/// The host's "is the chart surface visible" signal
///
/// The engine subscribes once per session and suspends all polling,
/// animation, and micro-tick work while the receiver reads `false`. On the
/// flip back to `true` it polls immediately instead of waiting out the
/// pending cadence.
pub trait VisibilitySignal: Send + Sync {
    /// Subscribe to visibility changes; the receiver yields `true` while
    /// the surface is visible.
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// Hosts without a visibility signal: permanently visible
pub struct AlwaysVisible {
    tx: watch::Sender<bool>,
}

impl AlwaysVisible {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }
}

impl Default for AlwaysVisible {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilitySignal for AlwaysVisible {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Host-driven visibility: the embedder pushes hide/show edges
pub struct ManualVisibility {
    tx: watch::Sender<bool>,
}

impl ManualVisibility {
    /// Starts visible
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    pub fn set_visible(&self, visible: bool) {
        // Subscribers may all be gone (session stopped); that is fine.
        let _ = self.tx.send(visible);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }

    pub fn show(&self) {
        self.set_visible(true);
    }
}

impl Default for ManualVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilitySignal for ManualVisibility {
    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
