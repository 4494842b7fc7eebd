//! Thin OS-command and file-removal wrappers for acting on a match.

use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::errors::{SearchError, SearchResult};

/// Opens `path` with the platform's default application.
///
/// The launcher process is spawned and not waited on.
pub fn open_file(path: &Path) -> SearchResult<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "linux") {
        Command::new("xdg-open")
    } else {
        return Err(SearchError::unsupported_platform(std::env::consts::OS));
    };

    debug!(path = %path.display(), "launching platform opener");
    command
        .arg(path)
        .spawn()
        .map_err(|e| SearchError::for_file(path, e))?;
    Ok(())
}

/// Removes the file at `path`.
pub fn delete_file(path: &Path) -> SearchResult<()> {
    fs::remove_file(path).map_err(|e| SearchError::for_file(path, e))?;
    debug!(path = %path.display(), "deleted file");
    Ok(())
}
