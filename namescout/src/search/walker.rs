//! Pool workers that traverse directory tasks.
//!
//! A walker loops on the shared work queue: it visits one directory at a
//! time, tests every regular file's name against the predicate, and pushes
//! child directories back onto the queue for whichever worker is free
//! next. The outstanding-task counter is the completion barrier: the
//! walker that retires the last task broadcasts [`Task::Shutdown`], which
//! every worker forwards before exiting so the whole pool drains.

use crossbeam_channel::{Receiver, Sender};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

use crate::cancel::CancellationToken;
use crate::diagnostics::Diagnostics;
use crate::results::Match;
use crate::search::matcher::NameMatcher;

/// A unit of traversal work drawn from the shared queue.
pub(crate) enum Task {
    /// Visit this directory: match its files, enqueue its subdirectories.
    Dir(PathBuf),
    /// Drain signal, forwarded by each worker before it exits.
    Shutdown,
}

/// Counters shared by every walker of one session.
#[derive(Debug, Default)]
pub(crate) struct WalkStats {
    pub dirs_visited: AtomicUsize,
    pub dirs_skipped: AtomicUsize,
    pub entries_skipped: AtomicUsize,
}

pub(crate) struct SubtreeWalker<'a> {
    pub matcher: &'a NameMatcher,
    pub tasks: Sender<Task>,
    pub results: Sender<Match>,
    /// Directories enqueued but not yet retired; zero means the walk is done
    pub outstanding: &'a AtomicUsize,
    pub diagnostics: &'a dyn Diagnostics,
    pub stats: &'a WalkStats,
    pub token: &'a CancellationToken,
}

impl SubtreeWalker<'_> {
    /// Worker loop: runs until the pool drains or every receiver is gone.
    pub(crate) fn run(&self, queue: Receiver<Task>) {
        while let Ok(task) = queue.recv() {
            match task {
                Task::Dir(dir) => {
                    if !self.token.is_cancelled() {
                        self.visit_dir(&dir);
                    }
                    // Retiring the last outstanding directory starts the
                    // pool-wide drain.
                    if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
                        let _ = self.tasks.send(Task::Shutdown);
                    }
                }
                Task::Shutdown => {
                    let _ = self.tasks.send(Task::Shutdown);
                    break;
                }
            }
        }
    }

    /// Lists one directory, emitting matches and enqueuing subdirectories.
    ///
    /// A directory that cannot be opened is pruned and recorded; per-entry
    /// errors skip just that entry. Neither aborts the walk.
    fn visit_dir(&self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.stats.dirs_skipped.fetch_add(1, Ordering::Relaxed);
                self.diagnostics.directory_skipped(dir, &err);
                return;
            }
        };

        self.stats.dirs_visited.fetch_add(1, Ordering::Relaxed);
        trace!(dir = %dir.display(), "visiting directory");

        for entry in entries {
            if self.token.is_cancelled() {
                return;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.stats.entries_skipped.fetch_add(1, Ordering::Relaxed);
                    self.diagnostics.entry_skipped(dir, &err);
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.stats.entries_skipped.fetch_add(1, Ordering::Relaxed);
                    self.diagnostics.entry_skipped(&path, &err);
                    continue;
                }
            };

            if file_type.is_dir() {
                // Count before sending so the barrier can never observe
                // zero while this task is still in flight.
                self.outstanding.fetch_add(1, Ordering::AcqRel);
                if self.tasks.send(Task::Dir(path)).is_err() {
                    self.outstanding.fetch_sub(1, Ordering::AcqRel);
                    return;
                }
            } else if file_type.is_file() {
                let name = entry.file_name();
                if self.matcher.is_match(&name.to_string_lossy()) {
                    let m = Match {
                        path,
                        containing_dir: dir.to_path_buf(),
                    };
                    // Rendezvous send: blocks until the collector takes it.
                    if self.results.send(m).is_err() {
                        return;
                    }
                }
            }
            // Symlinks and special files are neither matched nor followed.
        }
    }
}
