// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color::{self, Tone};
use bw_core::ProgressSnapshot;
use clap::ValueEnum;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

const BAR_WIDTH: usize = 20;

/// Fixed-width bar for a percentage; values outside `[0, 100]` are clamped.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Single-line summary, e.g. `b-1 processing [####------] 40.0% 4/10 rows`.
pub fn snapshot_line(snapshot: &ProgressSnapshot) -> String {
    let mut line = format!(
        "{} {} {} {:.1}% {}/{} rows",
        color::paint(Tone::Accent, snapshot.id.as_str()),
        color::status(snapshot.status),
        progress_bar(snapshot.progress, BAR_WIDTH),
        snapshot.clamped_progress(),
        snapshot.processed_rows,
        snapshot.total_rows,
    );
    let counts = format!(
        "(pending {}, running {}, completed {}, failed {})",
        snapshot.pending_count,
        snapshot.running_count,
        snapshot.completed_count,
        snapshot.failed_count
    );
    line.push(' ');
    line.push_str(&color::paint(Tone::Muted, &counts));
    if let Some(error) = &snapshot.error {
        line.push_str(&format!(" error: {error}"));
    }
    line
}

pub fn print_snapshot(snapshot: &ProgressSnapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", snapshot_line(snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string(snapshot)?),
    }
    Ok(())
}
