// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw stop|resume|retry|retry-failed <id>`

use super::Coordinator;
use crate::color::{self, Tone};
use crate::output::{print_snapshot, OutputFormat};
use anyhow::Result;
use bw_core::{BatchAction, BatchId};

pub async fn handle(
    coordinator: &Coordinator,
    id: BatchId,
    action: BatchAction,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = coordinator.run_action(&id, action).await?;
    match format {
        OutputFormat::Text => {
            println!("Sent {} to batch {}", action, color::paint(Tone::Accent, id.as_str()));
            match &snapshot {
                Some(snapshot) => print_snapshot(snapshot, format)?,
                None => println!("{}", color::paint(Tone::Muted, "progress unavailable")),
            }
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "batch": id,
                "action": action,
                "progress": snapshot,
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}
