//! netlab — network lab services and diagnostics.
//!
//! Two small long-running services plus a diagnostics toolkit:
//!
//! ```text
//!   TCP client ──▶ echo::listener ──spawn──▶ echo::session (one per conn)
//!                                             receive → classify → send
//!
//!   UDP peer  ──▶ datagram (logger loop, never replies)
//!
//!   netlab-cli ─▶ netinfo (link / routes / neighbors / resolver / probe)
//! ```
//!
//! The echo service uppercases whatever it receives and sends it back.
//! Two inputs are reserved: `".\r\n"` ends the session, `"matt\r\n"`
//! gets a canned greeting instead of an echo. Each accepted connection
//! is owned by exactly one spawned task; there is no state shared
//! between sessions.
//!
//! The `netinfo` module answers host-network questions (link state, MAC,
//! primary IP, gateway, DNS servers, netmask, ARP neighbors, hostname
//! lookup) by reading the tables the OS exports and delegating
//! resolution to the OS stack.

// Services
pub mod datagram;
pub mod echo;

// Diagnostics
pub mod netinfo;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;

pub use config::NetLabConfig;
pub use datagram::DatagramLogger;
pub use echo::EchoListener;
pub use lifecycle::Shutdown;
