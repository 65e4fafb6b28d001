//! End-to-end tests for the echo service.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

#[tokio::test]
async fn uppercase_echo_end_to_end() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let reply = common::send_and_read(&mut client, b"hello\r\n").await;
    assert_eq!(reply, b"HELLO\r\n");
}

#[tokio::test]
async fn echo_preserves_byte_length() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let message = b"MiXeD case, digits 123 and !?\r\n";
    let reply = common::send_and_read(&mut client, message).await;
    assert_eq!(reply.len(), message.len());
    assert_eq!(reply, b"MIXED CASE, DIGITS 123 AND !?\r\n");
}

#[tokio::test]
async fn greeting_trigger_gets_canned_reply() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let reply = common::send_and_read(&mut client, b"matt\r\n").await;
    assert_eq!(reply, b"Sup kid\n");
}

#[tokio::test]
async fn greeting_trigger_is_case_sensitive() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let reply = common::send_and_read(&mut client, b"Matt\r\n").await;
    assert_eq!(reply, b"MATT\r\n");
}

#[tokio::test]
async fn sentinel_closes_session_without_reply() {
    let (addr, _shutdown, tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    client.write_all(b".\r\n").await.unwrap();

    // The next read sees end-of-stream, not an echo.
    let mut buf = [0u8; 64];
    let n = client.read(&mut buf).await.unwrap();
    assert_eq!(n, 0);

    drop(client);
    common::wait_for_idle(&tracker, Duration::from_secs(2)).await;
}

#[tokio::test]
async fn sentinel_near_miss_is_ordinary_traffic() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let reply = common::send_and_read(&mut client, b".\r\nx").await;
    assert_eq!(reply, b".\r\nX");

    let reply = common::send_and_read(&mut client, b".").await;
    assert_eq!(reply, b".");
}

#[tokio::test]
async fn full_conversation() {
    let (addr, _shutdown, _tracker) = common::start_echo_server(common::test_echo_config()).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    assert_eq!(common::send_and_read(&mut client, b"hello\r\n").await, b"HELLO\r\n");
    assert_eq!(common::send_and_read(&mut client, b"matt\r\n").await, b"Sup kid\n");

    client.write_all(b".\r\n").await.unwrap();
    let mut buf = [0u8; 64];
    assert_eq!(client.read(&mut buf).await.unwrap(), 0);
}

#[tokio::test]
async fn timeout_sessions_release_resources() {
    let mut config = common::test_echo_config();
    config.receive_timeout_ms = 200;
    let (addr, _shutdown, tracker) = common::start_echo_server(config).await;

    // Repeated timeout-only sessions must leave the live count at zero.
    for _ in 0..3 {
        let mut client = TcpStream::connect(addr).await.unwrap();
        // Send nothing; the server times out and closes its side.
        let mut buf = [0u8; 16];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(n, 0);
        drop(client);
        common::wait_for_idle(&tracker, Duration::from_secs(2)).await;
    }
    assert_eq!(tracker.active_count(), 0);
}

#[tokio::test]
async fn stalled_session_does_not_block_accepts() {
    let mut config = common::test_echo_config();
    config.receive_timeout_ms = 10_000;
    let (addr, _shutdown, tracker) = common::start_echo_server(config).await;

    // One connection that never sends anything.
    let _stalled = TcpStream::connect(addr).await.unwrap();

    // The listener still accepts and serves new sessions.
    for i in 0..5 {
        let mut client = TcpStream::connect(addr).await.unwrap();
        let message = format!("round {}\r\n", i);
        let reply = common::send_and_read(&mut client, message.as_bytes()).await;
        assert_eq!(reply, format!("ROUND {}\r\n", i).as_bytes());
    }

    assert!(tracker.active_count() >= 1);
}

#[tokio::test]
async fn listener_stop_leaves_sessions_running() {
    let mut config = common::test_echo_config();
    config.receive_timeout_ms = 10_000;
    let (addr, shutdown, _tracker) = common::start_echo_server(config).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    assert_eq!(common::send_and_read(&mut client, b"before\r\n").await, b"BEFORE\r\n");

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // New connections are refused once the listener stops.
    assert!(TcpStream::connect(addr).await.is_err());

    // The in-flight session was not cancelled.
    assert_eq!(common::send_and_read(&mut client, b"after\r\n").await, b"AFTER\r\n");
}

#[tokio::test]
async fn large_message_is_echoed_across_reads() {
    let mut config = common::test_echo_config();
    config.buffer_size = 8;
    let (addr, _shutdown, _tracker) = common::start_echo_server(config).await;

    let mut client = TcpStream::connect(addr).await.unwrap();
    let message = b"the quick brown fox jumps over the lazy dog\r\n";
    client.write_all(message).await.unwrap();

    let mut reply = Vec::new();
    let mut buf = [0u8; 64];
    while reply.len() < message.len() {
        let n = client.read(&mut buf).await.unwrap();
        assert!(n > 0, "stream closed before the full reply arrived");
        reply.extend_from_slice(&buf[..n]);
    }
    assert_eq!(reply, b"THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG\r\n");
}
