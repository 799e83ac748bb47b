// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command error paths that need no live service.

use crate::prelude::*;

#[test]
fn show_without_base_url_explains_how_to_set_it() {
    cli().args(&["show", "b-1"]).exits_with(1).stderr_has("BW_BASE_URL").stdout_is_empty();
}

#[test]
fn show_rejects_invalid_base_url() {
    cli().args(&["show", "b-1", "--base-url", "not a url"]).exits_with(1).stderr_has("invalid base url");
}

#[test]
fn show_reports_unreachable_service() {
    cli()
        .args(&["show", "b-1", "b-2", "--timeout-ms", "2000"])
        .env("BW_BASE_URL", UNREACHABLE)
        .exits_with(3)
        .stderr_has("progress unavailable for b-1, b-2");
}

#[test]
fn failed_action_names_batch_and_action() {
    cli()
        .args(&["retry-failed", "b-7", "--base-url", UNREACHABLE, "--timeout-ms", "2000"])
        .exits_with(1)
        .stderr_has("retry-failed of batch b-7 failed");
}

#[test]
fn watch_requires_an_id() {
    cli().args(&["watch"]).exits_with(2).stderr_has("<IDS>...");
}
