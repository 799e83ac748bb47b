// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server-assigned batch identifiers.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Identifier of a batch run (one uploaded file).
///
/// The server hands ids out as strings or bare numbers; both end up here as
/// text so `42` and `"42"` name the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(SmolStr);

impl BatchId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<u64> for BatchId {
    fn from(id: u64) -> Self {
        Self::new(id.to_string())
    }
}

impl PartialEq<&str> for BatchId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
