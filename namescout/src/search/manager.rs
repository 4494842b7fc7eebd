//! Session lifecycle: asynchronous search handles and serialization of
//! successive searches.
//!
//! A consumer that reuses presentation state between searches must not
//! let two sessions write into it concurrently. [`SearchManager`] enforces
//! the discipline: starting a new search first cancels the in-flight
//! session and waits for its full teardown, so the old session's last
//! write happens-before the new session's first.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::cancel::CancellationToken;
use crate::config::SearchConfig;
use crate::diagnostics::Diagnostics;
use crate::errors::SearchResult;
use crate::results::SearchSummary;
use crate::search::engine;
use crate::sink::ResultSink;

/// A search running on its own thread.
pub struct SearchSession {
    token: CancellationToken,
    handle: JoinHandle<SearchResult<SearchSummary>>,
}

impl SearchSession {
    /// Spawns a session delivering into `sink`.
    pub fn spawn<S>(config: SearchConfig, sink: S, diagnostics: Arc<dyn Diagnostics>) -> Self
    where
        S: ResultSink + 'static,
    {
        let token = CancellationToken::new();
        let session_token = token.clone();
        let handle = thread::spawn(move || {
            let mut sink = sink;
            engine::search(&config, &mut sink, diagnostics.as_ref(), &session_token)
        });
        Self { token, handle }
    }

    /// Requests cooperative cancellation; the session still completes its
    /// teardown and fires the sink's completion signal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the session thread has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for teardown and returns the session outcome.
    pub fn join(self) -> SearchResult<SearchSummary> {
        self.handle.join().expect("search session thread panicked")
    }
}

/// Serializes search sessions: at most one alive at a time.
#[derive(Default)]
pub struct SearchManager {
    active: Option<SearchSession>,
}

impl SearchManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session, first cancelling and fully joining any
    /// in-flight one. Returns the torn-down session's outcome, if there
    /// was one.
    pub fn start<S>(
        &mut self,
        config: SearchConfig,
        sink: S,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Option<SearchResult<SearchSummary>>
    where
        S: ResultSink + 'static,
    {
        let previous = self.cancel_active();
        self.active = Some(SearchSession::spawn(config, sink, diagnostics));
        previous
    }

    /// Cancels and joins the active session, if any.
    pub fn cancel_active(&mut self) -> Option<SearchResult<SearchSummary>> {
        let session = self.active.take()?;
        session.cancel();
        Some(session.join())
    }

    /// Joins the active session without cancelling it.
    pub fn finish(&mut self) -> Option<SearchResult<SearchSummary>> {
        self.active.take().map(SearchSession::join)
    }
}
