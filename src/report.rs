// src/report.rs
// =============================================================================
// Renders validation results for humans (text) or machines (JSON), and
// decides the process exit code from them.
//
// Text output:
//     ✓ [OK] https://www.rust-lang.org (200)
//     ✗ [DEAD] ./missing.md (404)
//          README.md:3 "docs"
//
//   Total: 2 links (1 ok, 1 dead)
//
// "No links found." is printed only when the documents held no links at
// all. Links that were found but filtered out by --local-only/--remote-only
// still produce the summary line (Total: 0 links ...).
//
// JSON output: an array of {file, line, text, url, status, ok}
// =============================================================================

use serde::Serialize;
use std::io::{self, Write};

use crate::checker::{CheckReport, ValidationResult};

/// Exit code when every link is alive (or there were none)
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration and extraction errors
pub const EXIT_ERROR: i32 = 1;
/// Exit code when at least one link is dead
pub const EXIT_DEAD_LINKS: i32 = 2;

// The JSON projection of a ValidationResult. `error` is intentionally absent.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    file: String,
    line: usize,
    text: &'a str,
    url: &'a str,
    status: u16,
    ok: bool,
}

impl<'a> From<&'a ValidationResult> for JsonRecord<'a> {
    fn from(result: &'a ValidationResult) -> Self {
        Self {
            file: result.link.source_file.display().to_string(),
            line: result.link.line,
            text: &result.link.text,
            url: &result.link.target,
            status: result.status,
            ok: result.ok,
        }
    }
}

pub fn render_json(results: &[ValidationResult], out: &mut impl Write) -> anyhow::Result<()> {
    let records: Vec<JsonRecord> = results.iter().map(JsonRecord::from).collect();
    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    Ok(())
}

pub fn render_text(report: &CheckReport, out: &mut impl Write) -> io::Result<()> {
    if report.links_found == 0 {
        return writeln!(out, "No links found.");
    }

    let results = &report.results;
    for result in results {
        let (icon, label) = if result.ok { ("✓", "OK") } else { ("✗", "DEAD") };
        writeln!(out, "  {} [{}] {} ({})", icon, label, result.link.target, result.status)?;

        if !result.ok {
            writeln!(
                out,
                "         {}:{} \"{}\"",
                result.link.source_file.display(),
                result.link.line,
                result.link.text
            )?;
            if let Some(error) = &result.error {
                writeln!(out, "         Error: {}", error)?;
            }
        }
    }

    let dead = dead_count(results);
    writeln!(out)?;
    writeln!(
        out,
        "Total: {} links ({} ok, {} dead)",
        results.len(),
        results.len() - dead,
        dead
    )
}

pub fn exit_code(results: &[ValidationResult]) -> i32 {
    if dead_count(results) > 0 {
        EXIT_DEAD_LINKS
    } else {
        EXIT_OK
    }
}

fn dead_count(results: &[ValidationResult]) -> usize {
    results.iter().filter(|r| !r.ok).count()
}
