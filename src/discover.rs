// src/discover.rs
// =============================================================================
// Turns the paths given on the command line into a list of markdown files.
//
// - A file argument is used as-is, whatever its extension
// - A directory argument is walked recursively; files ending in .md,
//   .markdown or .mdx are kept, visited in file-name order. Symlinks to
//   files count as files; symlinked directories are not descended into
// - Entries the walk cannot read (e.g. a subdirectory without permission)
//   are skipped with a warning, and the rest of the tree is still scanned
// - A path that does not exist is a configuration error and stops the run
//
// Rust concepts:
// - walkdir: a recursive directory iterator that yields Result per entry
// =============================================================================

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::ConfigError;

const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

pub fn collect_markdown_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ConfigError> {
    if paths.is_empty() {
        return Err(ConfigError::NoPaths);
    }

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let found = walk_markdown(path);
            debug!(dir = %path.display(), files = found.len(), "walked directory");
            files.extend(found);
        } else {
            return Err(ConfigError::PathNotFound(path.clone()));
        }
    }

    Ok(files)
}

fn walk_markdown(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        // path().is_file() follows symlinks, file_type() would not
        if entry.path().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}
