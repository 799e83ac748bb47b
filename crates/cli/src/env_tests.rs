// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn interval_vars_parse_milliseconds() {
    std::env::set_var("BW_POLL_INTERVAL_MS", "1500");
    std::env::set_var("BW_HIDDEN_INTERVAL_MS", "soon");
    assert_eq!(poll_interval(), Some(Duration::from_millis(1500)));
    assert_eq!(hidden_interval(), None);
    std::env::remove_var("BW_POLL_INTERVAL_MS");
    std::env::remove_var("BW_HIDDEN_INTERVAL_MS");
}

#[test]
#[serial]
fn http_timeout_defaults_to_ten_seconds() {
    std::env::remove_var("BW_HTTP_TIMEOUT_MS");
    assert_eq!(http_timeout(), Duration::from_secs(10));
}

#[test]
#[serial]
fn empty_token_is_ignored() {
    std::env::set_var("BW_TOKEN", "");
    assert_eq!(token(), None);
    std::env::set_var("BW_TOKEN", "secret");
    assert_eq!(token().as_deref(), Some("secret"));
    std::env::remove_var("BW_TOKEN");
}

#[test]
#[serial]
fn bw_log_wins_over_rust_log() {
    std::env::set_var("RUST_LOG", "debug");
    std::env::set_var("BW_LOG", "bw_engine=trace");
    assert_eq!(log_filter(), "bw_engine=trace");
    std::env::remove_var("BW_LOG");
    assert_eq!(log_filter(), "debug");
    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter(), "warn");
}
