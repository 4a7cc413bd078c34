// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::future::Future;
use std::time::{Duration, Instant};

use log::debug;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::error::HttpError;
use super::types::RequestDescriptor;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// The capability the session dispatcher sends requests through.
///
/// Implementations put a [`RequestDescriptor`] on the wire and hand back the decoded
/// response body. Any `Err` is treated as the peer being unusable for this attempt.
pub trait Transport: Send + Sync {
    fn send(&self, request: &RequestDescriptor) -> impl Future<Output = Result<Value, HttpError>> + Send;
}

/// Production transport backed by `reqwest` with transient-retry middleware.
pub struct HttpTransport {
    client: reqwest_middleware::ClientWithMiddleware,
    last_latency: RwLock<Option<(Duration, Instant)>>,
}

impl HttpTransport {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::with_config(DEFAULT_MAX_RETRIES, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_config(max_retries: u32, timeout: Duration) -> Result<Self, anyhow::Error> {
        let retry_policy = reqwest_retry::policies::ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let inner_client = reqwest::Client::builder().timeout(timeout).build()?;

        let client = reqwest_middleware::ClientBuilder::new(inner_client)
            .with(reqwest_retry::RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            last_latency: RwLock::new(None),
        })
    }

    async fn update_latency(&self, duration: Duration) {
        *self.last_latency.write().await = Some((duration, Instant::now()));
    }

    pub async fn get_latency(&self) -> Option<Duration> {
        self.last_latency.read().await.map(|(d, _)| d)
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, HttpError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}

impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<Value, HttpError> {
        let start = Instant::now();
        let url = Url::parse(&request.url)?;
        let headers = header_map(&request.headers)?;

        let req = match request.method {
            Method::GET => self.client.get(url),
            Method::POST | Method::PUT => {
                let req = self.client.request(request.method.clone(), url);
                if let Some(body) = &request.body {
                    req.body(serde_json::to_string(body)?)
                        .header("Content-Type", "application/json")
                } else {
                    req
                }
            },
            ref other => return Err(HttpError::UnsupportedMethod(other.clone())),
        };

        let resp = req.headers(headers).send().await?;
        let latency = start.elapsed();
        self.update_latency(latency).await;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".into());
            return Err(HttpError::ServerError { status, body });
        }

        debug!(
            url = &*request.url,
            latency_ms = latency.as_millis() as u64;
            "HTTP: Response received"
        );

        Ok(resp.json().await?)
    }
}
