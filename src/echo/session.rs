//! Per-connection echo session.
//!
//! # Responsibilities
//! - Own one accepted connection and one receive buffer exclusively
//! - Zero the buffer, receive with a bounded timeout, classify, reply
//! - Uppercase ordinary traffic; answer the greeting trigger with a
//!   canned reply; end the session on the termination sentinel
//! - Tear down on every exit path: FIN the write half, drain the read
//!   half for a bounded time, then drop buffer and socket

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::config::EchoConfig;
use crate::echo::tracker::SessionGuard;

/// Ends the session when received as a lone message, no reply sent.
const TERMINATION_SENTINEL: &[u8] = b".\r\n";

/// Produces the canned greeting instead of an echo. Case-sensitive.
const GREETING_TRIGGER: &[u8] = b"matt\r\n";

/// The canned greeting reply.
const GREETING: &[u8] = b"Sup kid\n";

/// Per-session settings, passed by value into every spawned session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Bound on each wait for input.
    pub receive_timeout: Duration,
    /// Bound on each individual write call.
    pub send_timeout: Duration,
    /// Bound on the post-session read drain.
    pub drain_timeout: Duration,
    /// Receive buffer capacity.
    pub buffer_size: usize,
}

impl From<&EchoConfig> for SessionConfig {
    fn from(config: &EchoConfig) -> Self {
        Self {
            receive_timeout: Duration::from_millis(config.receive_timeout_ms),
            send_timeout: Duration::from_millis(config.send_timeout_ms),
            drain_timeout: Duration::from_millis(config.drain_timeout_ms),
            buffer_size: config.buffer_size,
        }
    }
}

/// What to do with one received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// End the session, no reply.
    Terminate,
    /// Send the canned greeting instead of an echo.
    Greet,
    /// Uppercase in place and echo back.
    Echo,
}

/// Classify the exact received payload.
///
/// The match is exact-length and byte-for-byte including line endings:
/// a prefix or extension of a sentinel is ordinary traffic.
fn classify(payload: &[u8]) -> Action {
    if payload == TERMINATION_SENTINEL {
        Action::Terminate
    } else if payload == GREETING_TRIGGER {
        Action::Greet
    } else {
        Action::Echo
    }
}

/// Send the whole payload, looping on partial writes.
///
/// Each write call is bounded by `send_timeout`. Any error, timeout, or
/// zero-length write aborts immediately; no error value ever enters the
/// sent-byte accounting.
async fn send_all<W>(
    writer: &mut W,
    mut payload: &[u8],
    send_timeout: Duration,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while !payload.is_empty() {
        let sent = time::timeout(send_timeout, writer.write(payload))
            .await
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "send timed out"))??;
        if sent == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                "peer stopped accepting data",
            ));
        }
        payload = &payload[sent..];
    }
    Ok(())
}

/// Run one session to completion. Consumes the connection; the stream,
/// the buffer, and the tracker guard are all released when this returns.
pub async fn run(
    mut stream: TcpStream,
    peer: SocketAddr,
    config: SessionConfig,
    guard: SessionGuard,
) {
    let session_id = guard.id();

    // The buffer must exist before any socket activity; if it cannot be
    // allocated the session ends without entering the loop.
    let mut buffer = Vec::new();
    if let Err(e) = buffer.try_reserve_exact(config.buffer_size) {
        tracing::warn!(
            session_id = %session_id,
            peer = %peer,
            error = %e,
            "Receive buffer allocation failed, aborting session"
        );
        return;
    }
    buffer.resize(config.buffer_size, 0);

    loop {
        // Zero the buffer so a short read never leaves the previous
        // message's trailing bytes in the sentinel comparison.
        buffer.fill(0);

        let received = match time::timeout(config.receive_timeout, stream.read(&mut buffer)).await {
            Ok(Ok(0)) => {
                tracing::debug!(session_id = %session_id, peer = %peer, "Peer closed");
                break;
            }
            Ok(Ok(n)) => n,
            Ok(Err(e)) => {
                tracing::debug!(session_id = %session_id, peer = %peer, error = %e, "Receive failed");
                break;
            }
            Err(_) => {
                tracing::debug!(session_id = %session_id, peer = %peer, "Receive timed out");
                break;
            }
        };

        match classify(&buffer[..received]) {
            Action::Terminate => {
                tracing::debug!(session_id = %session_id, peer = %peer, "Termination sentinel received");
                break;
            }
            Action::Greet => {
                if let Err(e) = send_all(&mut stream, GREETING, config.send_timeout).await {
                    tracing::debug!(session_id = %session_id, peer = %peer, error = %e, "Send failed");
                    break;
                }
            }
            Action::Echo => {
                buffer[..received].make_ascii_uppercase();
                if let Err(e) = send_all(&mut stream, &buffer[..received], config.send_timeout).await {
                    tracing::debug!(session_id = %session_id, peer = %peer, error = %e, "Send failed");
                    break;
                }
            }
        }
    }

    teardown(&mut stream, &mut buffer, config.drain_timeout).await;
    tracing::debug!(session_id = %session_id, peer = %peer, "Session ended");
}

/// Shut down the write half, then drain the read half until the peer
/// closes, a read errors, or the drain deadline elapses.
///
/// The bounded drain lets in-flight shutdown signaling complete before
/// the socket is released.
async fn teardown<S>(stream: &mut S, buffer: &mut [u8], drain_timeout: Duration)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let _ = stream.shutdown().await;

    let _ = time::timeout(drain_timeout, async {
        loop {
            match stream.read(buffer).await {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
        }
    })
    .await;
}
