//! Directory listing.
//!
//! Finds the audio files a batch run will touch: regular files under a root
//! directory whose *file name* matches a shell-style glob, optionally
//! descending into subdirectories.
//!
//! ## Ordering
//!
//! Entries are sorted by file name within each directory, and a directory's
//! own files come before the contents of its subdirectories. The list is
//! built once, up front, so files written during the run cannot reorder it.
//!
//! ## Matching
//!
//! Matching is case-insensitive: `*.mp3` picks up `Track.MP3` too, since
//! music libraries copied from other systems rarely agree on case.

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Invalid file filter '{0}': {1}")]
    Pattern(String, glob::PatternError),
    #[error("Could not read directory: {0}")]
    Walk(#[from] walkdir::Error),
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// List files under `dir` whose names match `pattern`.
///
/// Returned paths are absolute. A missing or non-directory root is
/// [`ScanError::DirectoryNotFound`]; an empty result is not an error.
pub fn list_files(dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>, ScanError> {
    let root = dir
        .canonicalize()
        .map_err(|_| ScanError::DirectoryNotFound(dir.to_path_buf()))?;
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let pattern =
        Pattern::new(pattern).map_err(|e| ScanError::Pattern(pattern.to_string(), e))?;

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .contents_first(false)
        .sort_by(|a, b| {
            // Files before directories, then by name
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            a_dir.cmp(&b_dir).then_with(|| a.file_name().cmp(b.file_name()))
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if pattern.matches_with(&name, MATCH_OPTIONS) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
