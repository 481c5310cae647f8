// src/checker/engine.rs
// =============================================================================
// The validation engine: documents in, one ValidationResult per link out.
//
// Pipeline:
// 1. Extract links from every document, in the order given
// 2. Each link is already classified local/remote by the extractor
// 3. Drop links the Scope filter excludes (they are never checked or counted)
// 4. Split into local and remote, keeping relative order in each
// 5. Check local links one by one, in order, on the calling task
// 6. Check remote links with at most `concurrency` probes in flight
// 7. Return local results (input order) then remote results
//    (COMPLETION order, which is not submission order), together with how
//    many links extraction found before the filter
//
// A document that cannot be read stops the whole run.
// =============================================================================

use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use super::http::RemoteValidator;
use super::link::{LinkKind, LinkRecord, ValidationResult};
use super::local::{base_dir_of, validate_local};
use super::markdown::extract_links;
use crate::error::ExtractionError;

/// Which kinds of links a run checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    All,
    LocalOnly,
    RemoteOnly,
}

impl Scope {
    pub fn includes(self, kind: LinkKind) -> bool {
        match self {
            Scope::All => true,
            Scope::LocalOnly => kind == LinkKind::Local,
            Scope::RemoteOnly => kind == LinkKind::Remote,
        }
    }
}

/// Five probes in flight at once unless told otherwise.
pub const DEFAULT_CONCURRENCY: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => panic!("default concurrency must be non-zero"),
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub scope: Scope,
    /// Upper bound on remote probes in flight at once
    pub concurrency: NonZeroUsize,
    /// Per-request timeout for each remote probe
    pub timeout: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Links found in the documents, before the Scope filter
    pub links_found: usize,
    /// One entry per in-scope link
    pub results: Vec<ValidationResult>,
}

// Runs a full check over `documents`
//
// Returns: every (in-scope) link's result exactly once, or the first
// ExtractionError encountered
pub async fn run(
    documents: &[PathBuf],
    options: &CheckOptions,
    remote: &RemoteValidator,
) -> Result<CheckReport, ExtractionError> {
    let mut links = Vec::new();
    for document in documents {
        let found = extract_links(document)?;
        debug!(file = %document.display(), links = found.len(), "extracted links");
        links.extend(found);
    }

    let links_found = links.len();
    info!(documents = documents.len(), links = links_found, "extraction finished");
    if links.is_empty() {
        return Ok(CheckReport::default());
    }

    let (local, remote_links): (Vec<LinkRecord>, Vec<LinkRecord>) = links
        .into_iter()
        .filter(|link| options.scope.includes(link.kind))
        .partition(LinkRecord::is_local);

    let mut results = Vec::with_capacity(local.len() + remote_links.len());

    for link in local {
        let base_dir = base_dir_of(&link.source_file);
        results.push(validate_local(link, &base_dir));
    }

    if !remote_links.is_empty() {
        info!(
            count = remote_links.len(),
            concurrency = options.concurrency.get(),
            "checking remote links"
        );

        // buffer_unordered yields in completion order
        let checked: Vec<ValidationResult> = stream::iter(remote_links)
            .map(|link| remote.validate(link, options.timeout))
            .buffer_unordered(options.concurrency.get())
            .collect()
            .await;

        results.extend(checked);
    }

    Ok(CheckReport { links_found, results })
}
