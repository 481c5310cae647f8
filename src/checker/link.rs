// src/checker/link.rs
// =============================================================================
// The data model shared by every stage of a check.
//
// - LinkRecord: one `[text](target)` occurrence found in a document
// - LinkKind: whether the target lives on disk or behind HTTP
// - ValidationResult: a LinkRecord plus the outcome of checking it
//
// A LinkRecord is never changed after extraction. Validators consume it and
// hand back a ValidationResult that owns it.
// =============================================================================

use std::path::PathBuf;

/// Target prefixes that mark a link as remote. Matched case-sensitively.
pub const REMOTE_PREFIXES: [&str; 3] = ["http://", "https://", "mailto:"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A path on the filesystem, relative to the document it appears in
    Local,
    /// An `http://`, `https://` or `mailto:` target
    Remote,
}

impl LinkKind {
    /// Classifies a raw target by its scheme prefix alone.
    pub fn of(target: &str) -> Self {
        if REMOTE_PREFIXES.iter().any(|prefix| target.starts_with(prefix)) {
            LinkKind::Remote
        } else {
            LinkKind::Local
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The document the link was found in, as given by the caller
    pub source_file: PathBuf,
    /// 1-indexed line number within `source_file`
    pub line: usize,
    pub text: String,
    pub target: String,
    pub kind: LinkKind,
}

impl LinkRecord {
    pub fn is_local(&self) -> bool {
        self.kind == LinkKind::Local
    }
}

/// The outcome of checking one link.
///
/// `status` is 0 when no response was received, otherwise the HTTP status
/// code (or a synthetic 200/404 for local targets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub link: LinkRecord,
    pub status: u16,
    pub ok: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    #[cfg(test)]
    pub fn is_local(&self) -> bool {
        self.link.is_local()
    }
}
