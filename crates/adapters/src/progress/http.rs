// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP progress adapter for the batch workflow API.
//!
//! Every endpoint answers with a `{code, msg, data}` envelope. A missing
//! `code` on a progress query counts as success; control actions require an
//! explicit `code: 0`.

use super::{AdapterError, ProgressAdapter};
use async_trait::async_trait;
use bw_core::{BatchAction, BatchId};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Connection settings for [`HttpProgressAdapter`].
#[derive(Debug, Clone)]
pub struct HttpProgressConfig {
    /// Prefix of the batch routes, e.g. `https://host/admin/gaia/workflow`
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub token: Option<String>,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl HttpProgressConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), token: None, timeout: Duration::from_secs(10) }
    }

    bw_core::setters! {
        token: Option<String>,
        timeout: Duration,
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub(crate) code: Option<i64>,
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default)]
    pub(crate) data: Option<Value>,
}

impl Envelope {
    /// Progress payload. An absent `code` is treated as success.
    pub(crate) fn into_progress(self) -> Result<Value, AdapterError> {
        match self.code {
            Some(code) if code != 0 => {
                Err(AdapterError::Api { code, msg: self.msg.unwrap_or_default() })
            }
            _ => match self.data {
                Some(Value::Null) | None => Err(AdapterError::EmptyPayload),
                Some(data) => Ok(data),
            },
        }
    }

    /// Control acknowledgement; only an explicit `code: 0` counts.
    pub(crate) fn into_ack(self) -> Result<(), AdapterError> {
        match self.code {
            Some(0) => Ok(()),
            code => Err(AdapterError::Api {
                code: code.unwrap_or(-1),
                msg: self.msg.unwrap_or_else(|| "missing response code".to_string()),
            }),
        }
    }
}

/// Progress adapter talking to the batch workflow REST API.
#[derive(Clone)]
pub struct HttpProgressAdapter {
    client: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpProgressAdapter {
    pub fn new(config: HttpProgressConfig) -> Result<Self, AdapterError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| AdapterError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(AdapterError::InvalidUrl(config.base_url));
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base, token: config.token.filter(|t| !t.is_empty()) })
    }

    /// `{base}/batch/{id}/{tail}` with the id percent-encoded as one segment.
    pub(crate) fn endpoint(&self, id: &BatchId, tail: &str) -> Result<Url, AdapterError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AdapterError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["batch", id.as_str(), tail]);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope, AdapterError> {
        let response = self.authorize(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

#[async_trait]
impl ProgressAdapter for HttpProgressAdapter {
    async fn query_progress(&self, id: &BatchId) -> Result<Value, AdapterError> {
        let url = self.endpoint(id, "progress")?;
        tracing::debug!(batch = %id, %url, "querying batch progress");
        self.send(self.client.get(url)).await?.into_progress()
    }

    async fn control(&self, id: &BatchId, action: BatchAction) -> Result<(), AdapterError> {
        let url = self.endpoint(id, action.as_str())?;
        tracing::info!(batch = %id, %action, "sending batch control action");
        self.send(self.client.post(url).header(reqwest::header::CONTENT_TYPE, "application/json"))
            .await?
            .into_ack()
    }
}

/// Check the HTTP status and parse the response envelope.
pub(crate) fn decode_envelope(status: u16, body: &str) -> Result<Envelope, AdapterError> {
    if !(200..300).contains(&status) {
        return Err(AdapterError::Status { status, body: body.chars().take(512).collect() });
    }
    serde_json::from_str(body).map_err(|e| AdapterError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
