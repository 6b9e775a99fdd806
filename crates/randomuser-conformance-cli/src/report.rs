// crates/randomuser-conformance-cli/src/report.rs
// ============================================================================
// Module: Run Reports
// Description: Canonical JSON and Markdown reports for a conformance run.
// Purpose: Persist outcomes and the request transcript for later review.
// Dependencies: randomuser-conformance-client, randomuser-conformance-core,
//               serde, serde_jcs
// ============================================================================

//! ## Overview
//! A report directory receives three files: `report.json` (canonical JSON),
//! `report.md` (human summary with full failure messages), and
//! `transcript.json` (every request the transport issued).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use randomuser_conformance_client::TranscriptEntry;
use randomuser_conformance_core::ScenarioOutcome;
use serde::Serialize;

// ============================================================================
// SECTION: Report
// ============================================================================

/// Aggregate result of one run.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RunReport {
    /// Endpoint the run targeted.
    pub(crate) base_url: String,
    /// Scenarios executed.
    pub(crate) total: usize,
    /// Scenarios that passed.
    pub(crate) passed: usize,
    /// Scenarios that failed.
    pub(crate) failed: usize,
    /// Per-scenario outcomes in suite order.
    pub(crate) outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    /// Builds a report from outcomes.
    pub(crate) fn new(base_url: &str, outcomes: Vec<ScenarioOutcome>) -> Self {
        let passed = outcomes.iter().filter(|outcome| outcome.passed()).count();
        Self {
            base_url: base_url.to_string(),
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
            outcomes,
        }
    }

    /// Returns the one-line run summary.
    pub(crate) fn summary_line(&self) -> String {
        format!("{} passed, {} failed, {} total", self.passed, self.failed, self.total)
    }

    /// Renders the Markdown summary.
    pub(crate) fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Conformance Report\n");
        let _ = writeln!(out, "- Target: `{}`", self.base_url);
        let _ = writeln!(out, "- Result: {}\n", self.summary_line());
        let _ = writeln!(out, "| Scenario | Status | Requests | Failure |");
        let _ = writeln!(out, "| --- | --- | --- | --- |");
        for outcome in &self.outcomes {
            let kind = outcome.failure.as_ref().map_or("", |failure| failure.kind.as_str());
            let _ = writeln!(
                out,
                "| {} | {} | {} | {kind} |",
                outcome.name,
                outcome.status.as_str(),
                outcome.requests
            );
        }
        for outcome in &self.outcomes {
            if let Some(failure) = &outcome.failure {
                let _ = writeln!(out, "\n## {}\n\n```text\n{}\n```", outcome.name, failure.message);
            }
        }
        out
    }
}

// ============================================================================
// SECTION: Writers
// ============================================================================

/// Writes `report.json`, `report.md`, and `transcript.json` into `dir`.
///
/// # Errors
///
/// Returns an error when the directory or a file cannot be written.
pub(crate) fn write_reports(
    dir: &Path,
    report: &RunReport,
    transcript: &[TranscriptEntry],
) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create {}: {err}", dir.display()))?;
    write_json(&dir.join("report.json"), report)?;
    write_file(&dir.join("report.md"), report.to_markdown().as_bytes())?;
    write_json(&dir.join("transcript.json"), &transcript)?;
    Ok(())
}

/// Serializes `value` as canonical JSON into `path`.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    let bytes = serde_jcs::to_vec(value)
        .map_err(|err| format!("failed to serialize {}: {err}", path.display()))?;
    write_file(path, &bytes)
}

/// Writes bytes to `path`.
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes).map_err(|err| format!("failed to write {}: {err}", path.display()))
}
