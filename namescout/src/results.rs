use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// A single file whose name satisfied the query.
///
/// Produced at most once per file per search session; ownership moves from
/// the walker that found it, through the collector, to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Absolute path of the matched file
    pub path: PathBuf,
    /// Directory the file lives in, kept separate for display annotation
    pub containing_dir: PathBuf,
}

impl Match {
    /// The base name of the matched file, lossily decoded for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Final accounting for one search session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchSummary {
    /// Matches handed to the sink before the completion signal
    pub matches_delivered: usize,
    /// Directories whose entries were listed
    pub dirs_visited: usize,
    /// Directories pruned because they could not be opened
    pub dirs_skipped: usize,
    /// Individual entries skipped on per-entry errors
    pub entries_skipped: usize,
    /// Whether the session was cancelled before the walk finished
    pub cancelled: bool,
    /// Wall-clock duration of the session
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let m = Match {
            path: PathBuf::from("/tmp/reports/invoice_jan.txt"),
            containing_dir: PathBuf::from("/tmp/reports"),
        };
        assert_eq!(m.file_name(), "invoice_jan.txt");
    }

    #[test]
    fn test_summary_default() {
        let summary = SearchSummary::default();
        assert_eq!(summary.matches_delivered, 0);
        assert_eq!(summary.dirs_skipped, 0);
        assert!(!summary.cancelled);
    }
}
