//! Configuration schema definitions.
//!
//! All knobs the services expose live here. There is no config file: the
//! `Default` impls carry the fixed lab constants (echo on TCP 8080,
//! datagram logger on UDP 9930, 5 s timeouts), and callers pass these
//! structs explicitly into the component that needs them.

use serde::{Deserialize, Serialize};

/// Root configuration for the netlab services.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NetLabConfig {
    /// TCP echo service settings.
    pub echo: EchoConfig,

    /// UDP datagram logger settings.
    pub datagram: DatagramConfig,
}

/// TCP echo service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Bind address (e.g. "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-receive timeout in milliseconds. A session that hears nothing
    /// for this long ends; it is not retried.
    pub receive_timeout_ms: u64,

    /// Per-write timeout in milliseconds.
    pub send_timeout_ms: u64,

    /// Upper bound in milliseconds on the post-session drain of the read
    /// half, before the socket is released.
    pub drain_timeout_ms: u64,

    /// Receive buffer capacity in bytes. One TCP segment's worth.
    pub buffer_size: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            receive_timeout_ms: 5_000,
            send_timeout_ms: 5_000,
            drain_timeout_ms: 5_000,
            buffer_size: 1_460,
        }
    }
}

/// UDP datagram logger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatagramConfig {
    /// Bind address (e.g. "0.0.0.0:9930").
    pub bind_address: String,

    /// Receive buffer capacity in bytes. One MTU minus IP/UDP headers.
    pub buffer_size: usize,
}

impl Default for DatagramConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9930".to_string(),
            buffer_size: 1_472,
        }
    }
}
