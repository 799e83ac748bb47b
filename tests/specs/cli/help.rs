// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn bw_no_args_shows_usage_and_fails() {
    cli().exits_with(2).stderr_has("Usage:");
}

#[test]
fn bw_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("watch")
        .stdout_has("show")
        .stdout_has("stop")
        .stdout_has("resume")
        .stdout_has("retry-failed");
}

#[test]
fn bw_watch_help_shows_flags() {
    cli()
        .args(&["watch", "--help"])
        .passes()
        .stdout_has("--follow")
        .stdout_has("--background")
        .stdout_has("--base-url");
}

#[test]
fn bw_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
