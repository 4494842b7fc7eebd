//! Concurrent filename search.
//!
//! The engine is a fan-out/fan-in pipeline: a bounded pool of walkers
//! draws directory tasks from a shared work queue, every match is handed
//! off through a single unbuffered channel to one collector, and an
//! outstanding-task counter acts as the completion barrier. Channel
//! disconnection is the one authoritative "search finished" signal: the
//! collector fires the sink's completion callback only after the last
//! match has been delivered.

pub mod engine;
pub mod manager;
pub mod matcher;
pub(crate) mod walker;

pub use engine::{search, search_collect};
pub use manager::{SearchManager, SearchSession};
pub use matcher::NameMatcher;
