//! Cancellation tokens for in-flight search sessions.
//!
//! A token is a shared atomic flag: cloning it hands the same flag to
//! another thread, so any holder can request cancellation and every
//! walker observes it. Cancellation is cooperative: walkers check the
//! token between directory entries and stop emitting, but the session
//! still runs its completion protocol so the consumer always receives
//! the terminal signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation token for terminating a search session early.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
