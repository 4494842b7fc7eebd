//! The consumer-side capability a search session delivers into.
//!
//! The collector owns exactly one sink per session and calls it from a
//! single thread: every match through [`ResultSink::emit`], then
//! [`ResultSink::complete`] exactly once after the last match. Injecting
//! the sink keeps the engine independent of any rendering mechanism and
//! lets tests substitute an in-memory implementation.

use crate::results::Match;
use std::sync::{Arc, Mutex};

/// Receives the match stream and the terminal completion signal.
pub trait ResultSink: Send {
    /// Called once per match, in delivery order. May block; a slow sink
    /// throttles the walkers through the unbuffered result channel.
    fn emit(&mut self, m: Match);

    /// Called exactly once, strictly after the last `emit` of the session.
    fn complete(&mut self);
}

#[derive(Debug, Default)]
struct Collected {
    matches: Vec<Match>,
    completed: bool,
    matches_at_completion: usize,
}

/// In-memory sink retaining everything it receives.
///
/// Clones share storage, so a caller can hand one clone to a session and
/// observe the other while (and after) the search runs.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    inner: Arc<Mutex<Collected>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches received so far.
    pub fn matches(&self) -> Vec<Match> {
        self.inner.lock().expect("sink lock poisoned").matches.clone()
    }

    /// Whether the completion signal has fired.
    pub fn is_complete(&self) -> bool {
        self.inner.lock().expect("sink lock poisoned").completed
    }

    /// Number of matches that had been delivered when `complete` fired.
    /// Equal to the final match count iff nothing arrived afterwards.
    pub fn matches_at_completion(&self) -> usize {
        self.inner
            .lock()
            .expect("sink lock poisoned")
            .matches_at_completion
    }
}

impl ResultSink for CollectingSink {
    fn emit(&mut self, m: Match) {
        self.inner.lock().expect("sink lock poisoned").matches.push(m);
    }

    fn complete(&mut self) {
        let mut inner = self.inner.lock().expect("sink lock poisoned");
        inner.completed = true;
        inner.matches_at_completion = inner.matches.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample(name: &str) -> Match {
        Match {
            path: PathBuf::from("/tmp").join(name),
            containing_dir: PathBuf::from("/tmp"),
        }
    }

    #[test]
    fn collecting_sink_records_order_and_completion() {
        let sink = CollectingSink::new();
        let mut handle = sink.clone();

        handle.emit(sample("a.txt"));
        handle.emit(sample("b.txt"));
        assert!(!sink.is_complete());

        handle.complete();
        assert!(sink.is_complete());
        assert_eq!(sink.matches().len(), 2);
        assert_eq!(sink.matches_at_completion(), 2);
        assert_eq!(sink.matches()[0].file_name(), "a.txt");
    }
}
