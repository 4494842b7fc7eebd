use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search and file operations.
///
/// Per-path traversal failures (an unreadable subdirectory, a transient
/// I/O error on one entry) are never represented here: they are contained
/// inside the walker that hit them and reported through
/// [`crate::diagnostics::Diagnostics`]. Only failures that prevent an
/// operation from starting or finishing at all surface as a `SearchError`.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Canonicalize the path and strip UNC prefixes so that
/// comparisons on Windows are consistent.
pub fn unify_path(original: &Path) -> PathBuf {
    let canonical = original
        .canonicalize()
        .unwrap_or_else(|_| original.to_path_buf());
    strip_unc_prefix(&canonical)
}

/// Strips the Windows UNC prefix (\\?\) from a path if present
fn strip_unc_prefix(p: &Path) -> PathBuf {
    let s = p.display().to_string();
    if let Some(stripped) = s.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        p.to_path_buf()
    }
}

impl SearchError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(os.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an I/O error on a directory to the matching typed variant.
    pub fn for_directory(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::DirectoryNotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::IoError(err),
        }
    }

    /// Maps an I/O error on a file to the matching typed variant.
    pub fn for_file(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path.into()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::IoError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("missing");
        let err = SearchError::directory_not_found(path);
        assert!(matches!(err, SearchError::DirectoryNotFound(_)));

        let err = SearchError::permission_denied(path);
        assert!(matches!(err, SearchError::PermissionDenied(_)));

        let err = SearchError::not_a_directory(path);
        assert!(matches!(err, SearchError::NotADirectory(_)));

        let err = SearchError::config_error("missing query");
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::directory_not_found("missing");
        assert_eq!(err.to_string(), "Directory not found: missing");

        let err = SearchError::not_a_directory("notes.txt");
        assert_eq!(err.to_string(), "Not a directory: notes.txt");

        let err = SearchError::unsupported_platform("plan9");
        assert_eq!(err.to_string(), "Unsupported platform: plan9");
    }

    #[test]
    fn test_io_error_mapping() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            SearchError::for_directory("d", not_found),
            SearchError::DirectoryNotFound(_)
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(
            SearchError::for_file("f", denied),
            SearchError::PermissionDenied(_)
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr");
        assert!(matches!(
            SearchError::for_directory("d", other),
            SearchError::IoError(_)
        ));
    }
}
