//! Single-level directory listing.
//!
//! This is the shallow "browse" view of one directory, and also the
//! primitive the search engine uses to enumerate the root's immediate
//! children before fanning out. Unlike traversal errors inside a walker,
//! a failure here is surfaced to the caller: without the listing there is
//! nothing to browse and no search to start.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// One immediate child of a browsed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    /// Base name, lossily decoded for display
    pub name: String,
    /// Full path of the child
    pub path: PathBuf,
    /// Whether the child is itself a directory (symlinks report false)
    pub is_dir: bool,
}

/// Lists the immediate children of `dir`, sorted by name.
///
/// Entries whose metadata cannot be read are dropped from the listing;
/// the listing itself failing is a typed error.
pub fn list_children(dir: &Path) -> SearchResult<Vec<DirChild>> {
    let meta = fs::metadata(dir).map_err(|e| SearchError::for_directory(dir, e))?;
    if !meta.is_dir() {
        return Err(SearchError::not_a_directory(dir));
    }

    let entries = fs::read_dir(dir).map_err(|e| SearchError::for_directory(dir, e))?;

    let mut children: Vec<DirChild> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            Some(DirChild {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir: file_type.is_dir(),
            })
        })
        .collect();

    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_listing_is_sorted_and_typed() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("alpha.txt")).unwrap();
        File::create(dir.path().join("gamma.log")).unwrap();

        let children = list_children(dir.path()).unwrap();
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.txt", "beta", "gamma.log"]);

        assert!(!children[0].is_dir);
        assert!(children[1].is_dir);
        assert_eq!(children[0].path, dir.path().join("alpha.txt"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(list_children(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            list_children(&missing),
            Err(SearchError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        File::create(&file).unwrap();
        assert!(matches!(
            list_children(&file),
            Err(SearchError::NotADirectory(_))
        ));
    }
}
