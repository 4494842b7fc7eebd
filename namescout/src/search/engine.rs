use crossbeam_channel::{bounded, unbounded};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use crate::browse;
use crate::cancel::CancellationToken;
use crate::config::SearchConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::errors::{unify_path, SearchResult};
use crate::results::{Match, SearchSummary};
use crate::search::matcher::NameMatcher;
use crate::search::walker::{SubtreeWalker, Task, WalkStats};
use crate::sink::{CollectingSink, ResultSink};

/// Runs one search session to completion.
///
/// Lists the root's immediate children (the only fatal failure point),
/// seeds the work queue with its subdirectories, and spawns a bounded
/// pool of walkers plus a single collector. Every match flows through an
/// unbuffered channel into `sink.emit`; once the last walker retires,
/// the channel disconnects and `sink.complete` fires strictly after the
/// last match, never before.
///
/// Blocks until the session is fully torn down. Cancelling the token
/// stops the walk early but still runs the completion protocol; the
/// returned summary reports `cancelled`.
pub fn search(
    config: &SearchConfig,
    sink: &mut dyn ResultSink,
    diagnostics: &dyn Diagnostics,
    token: &CancellationToken,
) -> SearchResult<SearchSummary> {
    let root = unify_path(&config.root_dir);
    info!(root = %root.display(), query = %config.query, "starting filename search");

    // Fatal if the root itself cannot be listed: the search never starts
    // and the sink is never completed.
    let children = browse::list_children(&root)?;

    let matcher = NameMatcher::new(&config.query);
    let stats = WalkStats::default();

    let seeds: Vec<PathBuf> = children
        .iter()
        .filter(|c| c.is_dir)
        .map(|c| c.path.clone())
        .collect();

    // Files directly under the root are outside the fan-out; they are
    // only tested when explicitly asked for.
    let root_matches: Vec<Match> = if config.include_root_files {
        children
            .iter()
            .filter(|c| !c.is_dir && matcher.is_match(&c.name))
            .map(|c| Match {
                path: c.path.clone(),
                containing_dir: root.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    debug!(
        subdirs = seeds.len(),
        root_matches = root_matches.len(),
        workers = config.thread_count.get(),
        "seeding work queue"
    );

    let outstanding = AtomicUsize::new(seeds.len());
    let worker_count = if seeds.is_empty() {
        0
    } else {
        config.thread_count.get()
    };

    let (task_tx, task_rx) = unbounded::<Task>();
    // Zero capacity: every send rendezvouses with the collector, so a
    // slow consumer throttles the walkers instead of growing a buffer.
    let (result_tx, result_rx) = bounded::<Match>(0);

    let started = Instant::now();

    let delivered = thread::scope(|s| {
        let collector = s.spawn(move || {
            let mut delivered = 0usize;
            while let Ok(m) = result_rx.recv() {
                if token.is_cancelled() {
                    // Keep draining so blocked senders unwind, but stop
                    // forwarding into the consumer.
                    continue;
                }
                sink.emit(m);
                delivered += 1;
            }
            sink.complete();
            delivered
        });

        for _ in 0..worker_count {
            let walker = SubtreeWalker {
                matcher: &matcher,
                tasks: task_tx.clone(),
                results: result_tx.clone(),
                outstanding: &outstanding,
                diagnostics,
                stats: &stats,
                token,
            };
            let queue = task_rx.clone();
            s.spawn(move || walker.run(queue));
        }

        for dir in seeds {
            let _ = task_tx.send(Task::Dir(dir));
        }
        for m in root_matches {
            if token.is_cancelled() || result_tx.send(m).is_err() {
                break;
            }
        }

        // The session's own handles must go away before the channels can
        // disconnect; the workers' clones drop as each thread exits.
        drop(task_tx);
        drop(result_tx);

        collector.join().expect("collector thread panicked")
    });

    let summary = SearchSummary {
        matches_delivered: delivered,
        dirs_visited: stats.dirs_visited.load(Ordering::Relaxed),
        dirs_skipped: stats.dirs_skipped.load(Ordering::Relaxed),
        entries_skipped: stats.entries_skipped.load(Ordering::Relaxed),
        cancelled: token.is_cancelled(),
        elapsed: started.elapsed(),
    };

    info!(
        matches = summary.matches_delivered,
        dirs_visited = summary.dirs_visited,
        dirs_skipped = summary.dirs_skipped,
        cancelled = summary.cancelled,
        "search complete"
    );

    Ok(summary)
}

/// Convenience binding: runs a session with an in-memory sink and default
/// diagnostics, returning the collected matches alongside the summary.
pub fn search_collect(config: &SearchConfig) -> SearchResult<(Vec<Match>, SearchSummary)> {
    let sink = CollectingSink::new();
    let mut session_sink = sink.clone();
    let summary = search(
        config,
        &mut session_sink,
        &LogDiagnostics,
        &CancellationToken::new(),
    )?;
    Ok((sink.matches(), summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_search_collect_basic() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/invoice.txt"), "x").unwrap();
        fs::write(dir.path().join("docs/notes.md"), "x").unwrap();

        let config = SearchConfig::for_query(dir.path(), "invoice");
        let (matches, summary) = search_collect(&config).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file_name(), "invoice.txt");
        assert_eq!(summary.matches_delivered, 1);
        assert!(!summary.cancelled);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let config = SearchConfig::for_query(dir.path().join("absent"), "x");
        assert!(search_collect(&config).is_err());
    }
}
