// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical progress snapshot and the sanitizer that builds it from
//! untrusted server payloads.
//!
//! The sanitizer never fails: every field that is missing or malformed is
//! replaced by a safe default so consumers always get something renderable.

use crate::batch::BatchStatus;
use crate::id::BatchId;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sanitized view of one batch at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub id: BatchId,
    pub status: BatchStatus,
    pub total_rows: u64,
    pub processed_rows: u64,
    /// `processed_rows / total_rows * 100`, or 0 when there are no rows.
    /// Not clamped: a server reporting more processed than total rows yields
    /// a value above 100.
    pub progress: f64,
    pub pending_count: u64,
    pub running_count: u64,
    pub completed_count: u64,
    pub failed_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressSnapshot {
    /// A pending snapshot with no rows, stamped `at`.
    pub fn empty(id: BatchId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: BatchStatus::Pending,
            total_rows: 0,
            processed_rows: 0,
            progress: 0.0,
            pending_count: 0,
            running_count: 0,
            completed_count: 0,
            failed_count: 0,
            error: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Progress clamped to `[0, 100]` for display.
    pub fn clamped_progress(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }
}

/// Build a [`ProgressSnapshot`] from a raw progress payload.
///
/// `fallback_id` is used when the payload carries no usable `id`; `now`
/// replaces missing or unparsable timestamps.
pub fn sanitize(raw: &Value, fallback_id: &BatchId, now: DateTime<Utc>) -> ProgressSnapshot {
    let field = |name: &str| raw.get(name);

    let total_rows = coerce_count(field("total_rows"));
    let processed_rows = coerce_count(field("processed_rows"));

    ProgressSnapshot {
        id: coerce_id(field("id")).unwrap_or_else(|| fallback_id.clone()),
        status: field("status")
            .and_then(Value::as_str)
            .and_then(BatchStatus::from_wire)
            .unwrap_or_default(),
        total_rows,
        processed_rows,
        progress: percent(processed_rows, total_rows),
        pending_count: coerce_count(field("pending_count")),
        running_count: coerce_count(field("running_count")),
        completed_count: coerce_count(field("completed_count")),
        failed_count: coerce_count(field("failed_count")),
        error: field("error").and_then(Value::as_str).filter(|s| !s.is_empty()).map(String::from),
        created_at: coerce_timestamp(field("created_at")).unwrap_or(now),
        updated_at: coerce_timestamp(field("updated_at")).unwrap_or(now),
    }
}

fn percent(processed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let progress = processed as f64 / total as f64 * 100.0;
    if progress.is_nan() {
        0.0
    } else {
        progress
    }
}

/// Non-negative integer from a number or numeric string; anything else is 0.
fn coerce_count(value: Option<&Value>) -> u64 {
    let number = match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => return v,
            None => n.as_f64(),
        },
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

fn coerce_id(value: Option<&Value>) -> Option<BatchId> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(BatchId::new(s.as_str())),
        Value::Number(n) => Some(BatchId::new(n.to_string())),
        _ => None,
    }
}

/// Offset-less layouts accepted after RFC 3339; all are taken as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// RFC 3339, an offset-less date-time, a bare date (midnight UTC) or epoch
/// milliseconds.
fn coerce_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_timestamp(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
