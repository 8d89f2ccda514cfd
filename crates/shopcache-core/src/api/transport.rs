//! HTTP transport for the storefront REST API.
//!
//! All remote traffic funnels through the `Transport` trait so tests can
//! substitute a scripted fake. The real implementation wraps a shared
//! `reqwest::Client` and reports every kind of failure the same way: as
//! the absence of a result. Callers decide what an absent result means
//! for their cached state.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::ApiError;

/// HTTP request timeout in seconds. Requests still in flight past this
/// are abandoned and surface as no result.
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// One remote call: a method, a path under the API base, and an optional
/// JSON body. Implementations must never panic or return an error; any
/// failure mode collapses to `None`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Option<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Transport backed by the real storefront API.
/// Clone shares the underlying connection pool.
///
/// Requests carry no authentication headers; the API is expected to sit
/// behind the storefront's own access control.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(err)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &text));
        }

        response
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Option<Value> {
        match self.request(method, path, body).await {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(%method, path, error = %err, "request failed, treating as no result");
                None
            }
        }
    }
}
