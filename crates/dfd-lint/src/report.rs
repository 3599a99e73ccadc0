//! Diagnostic reports
//!
//! Text reports quote the offending line and underline the span:
//!
//! ```text
//! process.out:1:12: duplicate input: a
//!   forward a, a
//!              ^
//! ```

use anyhow::{Context, Result};
use dfd_behavior::Diagnostic;
use serde::Serialize;
use std::fmt::Write as _;

/// Diagnostics of one port
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortReport {
    /// Port name
    pub port: String,
    /// Findings, by line
    pub diagnostics: Vec<Diagnostic>,
}

/// Render reports as text, one block per diagnostic
#[must_use]
pub fn render_text(reports: &[PortReport], behaviors: &[&str]) -> String {
    let mut out = String::new();
    for (report, behavior) in reports.iter().zip(behaviors) {
        let lines: Vec<&str> = behavior.split('\n').map(|l| l.trim_end_matches('\r')).collect();
        for d in &report.diagnostics {
            let _ = writeln!(out, "{}:{}", report.port, d);
            if let Some(line) = lines.get(d.line) {
                let _ = writeln!(out, "  {line}");
                let _ = writeln!(out, "  {}", underline(line, d));
            }
        }
    }
    out
}

/// Render reports as a JSON array
///
/// # Errors
/// Serialization failure
pub fn render_json(reports: &[PortReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("serializing report")
}

/// Spaces up to the span, then `^` over it; tabs are kept so the caret lines up
fn underline(line: &str, d: &Diagnostic) -> String {
    let mut marker: String = line
        .chars()
        .take(d.col_start)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let width = d.col_end.saturating_sub(d.col_start).max(1);
    marker.extend(std::iter::repeat('^').take(width));
    marker
}
