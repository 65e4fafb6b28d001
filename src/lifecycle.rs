//! Stop signaling for the long-running services.
//!
//! "Stop" means stop accepting new work: the echo listener and the
//! datagram logger each hold a receiver and exit their loops when the
//! signal fires. Echo sessions already in flight are deliberately not
//! cancellable; each runs to its own end (sentinel, timeout, or error)
//! and releases its resources there.

use tokio::sync::broadcast;

/// Hands out stop-signal receivers and fires the signal once.
pub struct Shutdown {
    signal: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (signal, _) = broadcast::channel(1);
        Self { signal }
    }

    /// A receiver for one service loop to select on.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.signal.subscribe()
    }

    /// Fire the stop signal. Harmless when no loop is listening.
    pub fn trigger(&self) {
        let _ = self.signal.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
