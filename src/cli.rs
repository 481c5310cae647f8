// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
//   mdlinkcheck [PATHS]... [--format text|json] [--local-only | --remote-only]
//               [--concurrency N] [--timeout SECS] [-v...]
// =============================================================================

use clap::{ArgAction, Parser, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::checker::{CheckOptions, Scope, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "mdlinkcheck",
    version,
    about = "Find dead local and remote links in markdown files",
    long_about = "mdlinkcheck scans markdown files for [text](target) links, checks that \
                  local targets exist on disk and that remote targets answer a HEAD request. \
                  Exits 0 when every link is alive, 2 when any link is dead and 1 on \
                  configuration errors, so it can gate a CI pipeline."
)]
pub struct Cli {
    /// Markdown files or directories to scan
    ///
    /// Directories are searched recursively for .md, .markdown and .mdx files
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Only check local file links
    #[arg(long, conflicts_with = "remote_only")]
    pub local_only: bool,

    /// Only check remote HTTP links
    #[arg(long)]
    pub remote_only: bool,

    /// Max concurrent requests
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: NonZeroUsize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl Cli {
    pub fn scope(&self) -> Scope {
        // clap rejects both flags together, see `conflicts_with`
        match (self.local_only, self.remote_only) {
            (true, _) => Scope::LocalOnly,
            (false, true) => Scope::RemoteOnly,
            (false, false) => Scope::All,
        }
    }

    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            scope: self.scope(),
            concurrency: self.concurrency,
            timeout: Duration::from_secs(self.timeout),
        }
    }
}
