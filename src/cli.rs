//! Command handlers for the `reqif-tools` binary.
//!
//! Each handler parses its inputs, prints either a JSON document or a
//! human-readable summary, and returns the process exit code.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::diff::{self, ChangeKind, DiffResult};
use crate::parsers::{self, ParseOutput};
use crate::quality::NamespaceMode;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Parse one document and report its contents and diagnostics.
///
/// Exit code 0 on success; parse failures propagate as errors.
pub fn run_parse(path: &Path, format: OutputFormat) -> Result<i32> {
    let output = parsers::parse_file(path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Summary => print_parse_summary(path, &output),
    }
    Ok(0)
}

/// Compare two documents.
///
/// Exit code 0 when the sets are identical, 1 when changes were detected.
pub fn run_diff(
    baseline_path: &Path,
    revised_path: &Path,
    format: OutputFormat,
    fail_on_change: bool,
) -> Result<i32> {
    let baseline = parsers::parse_file(baseline_path)
        .with_context(|| format!("failed to parse baseline {}", baseline_path.display()))?;
    let revised = parsers::parse_file(revised_path)
        .with_context(|| format!("failed to parse revised {}", revised_path.display()))?;

    let result = diff::compare(&baseline.requirements, &revised.requirements);
    info!(
        baseline = %baseline_path.display(),
        revised = %revised_path.display(),
        changes = result.summary.field_change_count,
        "diff complete"
    );

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Summary => print_diff_summary(&result),
    }

    if fail_on_change && !result.is_identical() {
        return Ok(1);
    }
    Ok(0)
}

fn print_parse_summary(path: &Path, output: &ParseOutput) {
    let diag = &output.diagnostics;
    println!("Parsed {}", path.display());
    println!("  Requirements:     {}", output.requirements.len());
    println!(
        "  Namespace:        {}",
        match diag.namespace_mode {
            NamespaceMode::Known => "known",
            NamespaceMode::Heuristic => "heuristic",
            NamespaceMode::Absent => "absent",
        }
    );
    println!("  Definitions:      {}", diag.definition_count);
    println!(
        "  Resolution rate:  {:.0}%",
        diag.resolution_rate * 100.0
    );
    println!("  Quality score:    {:.1}/100", diag.quality_score);
    if diag.discovery.used_fallback() {
        println!(
            "  Discovery:        {} lookups needed tag-name fallbacks",
            diag.discovery.local_name + diag.discovery.case_insensitive
        );
    }
    if !diag.warnings.is_empty() {
        println!("  Warnings:         {}", diag.warnings.len());
    }
}

fn print_diff_summary(result: &DiffResult) {
    let s = &result.summary;
    println!("Compared {} requirements", s.total_compared);
    println!("  Added:     {:>5}  ({:.1}%)", s.added, s.added_pct);
    println!("  Deleted:   {:>5}  ({:.1}%)", s.deleted, s.deleted_pct);
    println!("  Modified:  {:>5}  ({:.1}%)", s.modified, s.modified_pct);
    println!("  Unchanged: {:>5}  ({:.1}%)", s.unchanged, s.unchanged_pct);

    for requirement in &result.added {
        println!("+ {}  {}", requirement.id, requirement.title);
    }
    for requirement in &result.deleted {
        println!("- {}  {}", requirement.id, requirement.title);
    }
    for modified in &result.modified {
        println!("~ {}", modified.id);
        for change in &modified.changes {
            match change.kind {
                ChangeKind::ValueChanged => println!(
                    "    {}: {:?} -> {:?}",
                    change.field,
                    change.old_value.as_deref().unwrap_or(""),
                    change.new_value.as_deref().unwrap_or("")
                ),
                ChangeKind::Added => println!(
                    "    {}: (added) {:?}",
                    change.field,
                    change.new_value.as_deref().unwrap_or("")
                ),
                ChangeKind::Removed => println!(
                    "    {}: (removed) {:?}",
                    change.field,
                    change.old_value.as_deref().unwrap_or("")
                ),
            }
        }
    }
    for warning in &result.warnings {
        println!("! duplicate id {} ({:?} side)", warning.id, warning.side);
    }
}
