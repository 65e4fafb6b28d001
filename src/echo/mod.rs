//! Uppercase echo service.
//!
//! # Data Flow
//! ```text
//! listener.rs: bind → accept ─┬─▶ spawn session task, resume accepting
//!                             └─▶ (accept error: log, pause, retry)
//!
//! session.rs (one task per connection):
//!     zero buffer → receive (bounded) → classify
//!         ".\r\n"    → teardown, no reply
//!         "matt\r\n" → send fixed greeting
//!         otherwise  → uppercase in place, send
//!     teardown: FIN write half → bounded read drain → drop socket
//! ```
//!
//! # Design Decisions
//! - One task owns one connection and one buffer for their whole
//!   lifetime; nothing is shared between sessions
//! - No cap on concurrent sessions; the tracker only counts them
//! - Receive timeout ends the session, it is never retried

pub mod listener;
pub mod session;
pub mod tracker;

pub use listener::{EchoListener, ListenerError};
pub use session::SessionConfig;
pub use tracker::{SessionGuard, SessionTracker};
