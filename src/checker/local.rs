// src/checker/local.rs
// =============================================================================
// Checks local (filesystem) links.
//
// A local target is resolved against the directory of the document that
// contains it:
//
//     docs/guide/intro.md  +  ../api.md?raw#top   ->  docs/api.md
//
// The fragment and query never matter for existence, so they are cut off
// before resolving. `.` and `..` are collapsed lexically, without touching
// the filesystem, and the result is checked with a single existence test.
//
// Nothing here can fail: a missing file is a normal "dead" result.
// =============================================================================

use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::link::{LinkRecord, ValidationResult};

/// Validates a local link against `base_dir`, the absolute directory of the
/// link's source document.
pub fn validate_local(link: LinkRecord, base_dir: &Path) -> ValidationResult {
    let resolved = resolve_target(base_dir, &link.target);
    let ok = resolved.exists();

    debug!(link = %link.target, path = %resolved.display(), ok, "checked local link");

    ValidationResult {
        link,
        status: if ok { 200 } else { 404 },
        ok,
        error: None,
    }
}

/// The absolute directory containing `source_file`.
///
/// Relative paths are anchored at the current working directory.
pub fn base_dir_of(source_file: &Path) -> PathBuf {
    let absolute = std::path::absolute(source_file).unwrap_or_else(|_| source_file.to_path_buf());
    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

// Strips `#fragment` then `?query` from a local target
fn strip_fragment_and_query(target: &str) -> &str {
    let target = target.split('#').next().unwrap_or(target);
    target.split('?').next().unwrap_or(target)
}

// Joins the cleaned target onto base_dir and collapses `.` / `..`
fn resolve_target(base_dir: &Path, target: &str) -> PathBuf {
    let joined = base_dir.join(strip_fragment_and_query(target));
    normalize(&joined)
}

// Lexical normalization: `a/./b/../c` -> `a/c`
//
// `..` at the root stays at the root, matching how the OS treats `/..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
