//! UDP datagram logger.
//!
//! Binds one UDP socket and logs every datagram it receives. It never
//! replies. The received-datagram counter exists for observability and
//! for tests; nothing else reads it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::broadcast;

use crate::config::DatagramConfig;

/// Handle onto the logger's received-datagram counter.
#[derive(Debug, Clone, Default)]
pub struct DatagramStats {
    received: Arc<AtomicU64>,
}

impl DatagramStats {
    /// Total datagrams received so far.
    pub fn received_count(&self) -> u64 {
        self.received.load(Ordering::SeqCst)
    }
}

/// The UDP logging service.
pub struct DatagramLogger {
    socket: UdpSocket,
    config: DatagramConfig,
    stats: DatagramStats,
}

impl DatagramLogger {
    /// Bind to the configured address. Bind failure is fatal to startup.
    pub async fn bind(config: DatagramConfig) -> Result<Self, std::io::Error> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let socket = UdpSocket::bind(addr).await?;
        let local_addr = socket.local_addr()?;

        tracing::info!(address = %local_addr, "Datagram logger bound");

        Ok(Self {
            socket,
            config,
            stats: DatagramStats::default(),
        })
    }

    /// Get the local address this logger is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.socket.local_addr()
    }

    /// Get a handle to the received-datagram counter.
    pub fn stats(&self) -> DatagramStats {
        self.stats.clone()
    }

    /// Run the receive loop until the shutdown signal fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            // Zeroed each round so the logged text never carries a
            // previous datagram's tail.
            buffer.fill(0);

            tokio::select! {
                received = self.socket.recv_from(&mut buffer) => {
                    match received {
                        Ok((n, peer)) => {
                            self.stats.received.fetch_add(1, Ordering::SeqCst);
                            if n > 0 {
                                tracing::info!(
                                    peer = %peer,
                                    bytes = n,
                                    message = %String::from_utf8_lossy(&buffer[..n]).trim_end(),
                                    "Datagram received"
                                );
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Datagram receive failed");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Datagram logger received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
