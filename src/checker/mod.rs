// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - link: LinkRecord / ValidationResult data model and local/remote classifier
// - markdown: Extracts links from markdown documents
// - local: Checks that local link targets exist on disk
// - http: Makes HTTP HEAD requests to check if remote links are alive
// - engine: Ties the above together with a bounded pool of remote probes
//
// This file (mod.rs) is the module root. It re-exports the public API that
// main.rs and report.rs use.
// =============================================================================

mod engine;
mod http;
mod link;
mod local;
mod markdown;

#[cfg(test)]
mod test_server;

pub use engine::{run, CheckOptions, CheckReport, Scope, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
pub use http::RemoteValidator;
pub use link::ValidationResult;

#[cfg(test)]
pub use link::{LinkKind, LinkRecord};
