//! Session lifecycle tracking.
//!
//! # Responsibilities
//! - Generate unique session IDs for tracing
//! - Count live sessions (logging, and leak checks in tests)
//!
//! The tracker never limits anything; sessions are unbounded by design.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global atomic counter for session IDs.
/// Relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static SESSION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Generate a new unique session ID.
    pub fn new() -> Self {
        Self(SESSION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Counts live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    /// Current count of live sessions.
    active_count: Arc<AtomicU64>,
}

impl SessionTracker {
    /// Create a new session tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new live session. Returns a guard that decrements on drop.
    pub fn track(&self) -> SessionGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        SessionGuard {
            active_count: Arc::clone(&self.active_count),
            id: SessionId::new(),
        }
    }

    /// Get the current live session count.
    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }
}

/// Guard that tracks a session's lifetime.
/// Decrements the live count when dropped.
#[derive(Debug)]
pub struct SessionGuard {
    active_count: Arc<AtomicU64>,
    id: SessionId,
}

impl SessionGuard {
    /// Get this session's ID.
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(session_id = %self.id, "Session closed");
    }
}
