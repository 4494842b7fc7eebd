//! Skip-event reporting for partial traversal failures.
//!
//! Walkers never surface per-path errors to the caller; they hand them to
//! a [`Diagnostics`] implementation instead. The default implementation
//! logs through `tracing`; tests inject [`RecordingDiagnostics`] to assert
//! on the recorded events rather than on console output.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Receives skip events from walkers. Shared across the worker pool.
pub trait Diagnostics: Send + Sync {
    /// A directory could not be opened; its subtree was pruned.
    fn directory_skipped(&self, dir: &Path, err: &io::Error);

    /// A single entry could not be inspected; it was skipped.
    fn entry_skipped(&self, path: &Path, err: &io::Error);
}

/// Default diagnostics: structured log lines, nothing retained.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn directory_skipped(&self, dir: &Path, err: &io::Error) {
        warn!(dir = %dir.display(), error = %err, "skipping unreadable directory");
    }

    fn entry_skipped(&self, path: &Path, err: &io::Error) {
        warn!(path = %path.display(), error = %err, "skipping entry");
    }
}

/// Diagnostics that record every skip for later inspection.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    skipped_dirs: Mutex<Vec<PathBuf>>,
    skipped_entries: Mutex<Vec<PathBuf>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories pruned so far.
    pub fn skipped_dirs(&self) -> Vec<PathBuf> {
        self.skipped_dirs.lock().expect("diagnostics lock poisoned").clone()
    }

    /// Entries skipped so far.
    pub fn skipped_entries(&self) -> Vec<PathBuf> {
        self.skipped_entries
            .lock()
            .expect("diagnostics lock poisoned")
            .clone()
    }

    pub fn skipped_dir_count(&self) -> usize {
        self.skipped_dirs.lock().expect("diagnostics lock poisoned").len()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn directory_skipped(&self, dir: &Path, _err: &io::Error) {
        self.skipped_dirs
            .lock()
            .expect("diagnostics lock poisoned")
            .push(dir.to_path_buf());
    }

    fn entry_skipped(&self, path: &Path, _err: &io::Error) {
        self.skipped_entries
            .lock()
            .expect("diagnostics lock poisoned")
            .push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_diagnostics_tracks_events() {
        let diags = RecordingDiagnostics::new();
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        diags.directory_skipped(Path::new("/locked"), &err);
        diags.entry_skipped(Path::new("/locked/file"), &err);
        diags.directory_skipped(Path::new("/locked/deeper"), &err);

        assert_eq!(diags.skipped_dir_count(), 2);
        assert_eq!(diags.skipped_dirs()[0], PathBuf::from("/locked"));
        assert_eq!(diags.skipped_entries(), vec![PathBuf::from("/locked/file")]);
    }
}
