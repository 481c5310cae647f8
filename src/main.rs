// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Expand the given paths into a list of markdown files
// 3. Run the validation engine over them
// 4. Print the results as text or JSON
// 5. Exit with the CI-friendly code:
//      0 = no links, or every link is alive
//      1 = configuration error (no paths, missing path, bad flags,
//          unreadable document)
//      2 = at least one dead link
// =============================================================================

mod checker;   // src/checker/ - extraction, validation and the engine
mod cli;       // src/cli.rs - command-line parsing
mod discover;  // src/discover.rs - finding markdown files
mod error;     // src/error.rs - configuration and extraction errors
mod report;    // src/report.rs - text/JSON output and exit codes

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Format};
use std::io::{self, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // `{:#}` prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            report::EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
// Returns:
//   Ok(code) = the exit code decided by the results (0 or 2),
//              or by clap for --help / usage errors
//   Err = configuration or extraction error (exit code 1)
async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() { report::EXIT_ERROR } else { report::EXIT_OK };
            let _ = e.print();
            return Ok(code);
        }
    };

    init_logging(cli.verbose);

    let documents = discover::collect_markdown_files(&cli.paths)?;
    info!(count = documents.len(), "found markdown files");

    let validator = checker::RemoteValidator::new().context("Failed to create HTTP client")?;
    let report = checker::run(&documents, &cli.options(), &validator).await?;

    for dead in report.results.iter().filter(|r| !r.ok) {
        debug!(
            file = %dead.link.source_file.display(),
            line = dead.link.line,
            url = %dead.link.target,
            status = dead.status,
            "dead link"
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Json => report::render_json(&report.results, &mut out)?,
        Format::Text => report::render_text(&report, &mut out)?,
    }
    out.flush()?;

    Ok(report::exit_code(&report.results))
}

// Sends tracing output to stderr so stdout only ever holds the report.
// RUST_LOG wins over -v when it is set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .init();
}
