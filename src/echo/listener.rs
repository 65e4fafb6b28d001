//! TCP listener for the echo service.
//!
//! # Responsibilities
//! - Bind to the configured address (bind failure is fatal)
//! - Accept incoming TCP connections
//! - Spawn one independent session task per accepted connection
//! - Retry accept errors; never block on a session's lifetime

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::EchoConfig;
use crate::echo::session::{self, SessionConfig};
use crate::echo::tracker::SessionTracker;

/// How long to pause after a failed accept before retrying.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// The echo service's accept loop.
///
/// Accepts connections indefinitely and hands each one to a freshly
/// spawned session task. There is no cap on concurrent sessions; the
/// tracker only counts them. A failed accept is logged and retried,
/// never fatal.
pub struct EchoListener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Echo service settings, the session slice of which is passed to
    /// every spawned session.
    config: EchoConfig,
    /// Live session counter.
    tracker: SessionTracker,
}

impl EchoListener {
    /// Bind to the configured address. Bind failure is fatal to startup.
    pub async fn bind(config: EchoConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|e| ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(ListenerError::Bind)?;

        let local_addr = listener
            .local_addr()
            .map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            receive_timeout_ms = config.receive_timeout_ms,
            "Echo listener bound"
        );

        Ok(Self {
            inner: listener,
            config,
            tracker: SessionTracker::new(),
        })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Get a handle to the live session counter.
    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Run the accept loop until the shutdown signal fires.
    ///
    /// Stopping only stops accepting; sessions already spawned keep
    /// running to their own end.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                accepted = self.inner.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let guard = self.tracker.track();
                            tracing::debug!(
                                peer = %peer,
                                session_id = %guard.id(),
                                active = self.tracker.active_count(),
                                "Connection accepted"
                            );
                            let session_config = SessionConfig::from(&self.config);
                            tokio::spawn(session::run(stream, peer, session_config, guard));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Accept failed, retrying");
                            tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Echo listener received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
