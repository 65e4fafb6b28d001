//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use netlab::config::EchoConfig;
use netlab::echo::{EchoListener, SessionTracker};
use netlab::lifecycle::Shutdown;

/// Echo config suitable for tests: loopback, ephemeral port, short
/// timeouts so timeout-path tests run quickly.
pub fn test_echo_config() -> EchoConfig {
    EchoConfig {
        bind_address: "127.0.0.1:0".to_string(),
        receive_timeout_ms: 500,
        send_timeout_ms: 500,
        drain_timeout_ms: 500,
        buffer_size: 1_460,
    }
}

/// Bind and spawn an echo server, returning its address, the shutdown
/// handle, and a clone of its session tracker.
pub async fn start_echo_server(config: EchoConfig) -> (SocketAddr, Shutdown, SessionTracker) {
    let listener = EchoListener::bind(config).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let tracker = listener.tracker().clone();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        listener.run(rx).await;
    });

    (addr, shutdown, tracker)
}

/// Write one message and read back a single reply.
pub async fn send_and_read(stream: &mut TcpStream, message: &[u8]) -> Vec<u8> {
    stream.write_all(message).await.unwrap();
    let mut buf = vec![0u8; 4096];
    let n = stream.read(&mut buf).await.unwrap();
    buf.truncate(n);
    buf
}

/// Poll until the tracker reports no live sessions, or panic after the
/// deadline.
#[allow(dead_code)]
pub async fn wait_for_idle(tracker: &SessionTracker, deadline: Duration) {
    let poll = async {
        while tracker.active_count() > 0 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    };
    tokio::time::timeout(deadline, poll)
        .await
        .expect("sessions still live past deadline");
}
