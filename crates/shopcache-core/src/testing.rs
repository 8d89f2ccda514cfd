//! Test doubles shared across unit tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::{Method, Transport};

/// Scripted transport. Responses are queued per method and path and
/// consumed one per call; anything unscripted answers with no result,
/// like a dead network. Every call is recorded in dispatch order.
pub(crate) struct FakeTransport {
    responses: Mutex<HashMap<String, VecDeque<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::default(),
            calls: Mutex::default(),
            latency: None,
        }
    }

    /// A transport whose responses arrive only after `latency`.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::new()
        }
    }

    pub async fn script(&self, method: Method, path: &str, response: Value) {
        self.responses
            .lock()
            .await
            .entry(Self::route(method, path))
            .or_default()
            .push_back(response);
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    fn route(method: Method, path: &str) -> String {
        format!("{} {}", method, path)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Option<Value> {
        self.calls.lock().await.push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.responses
            .lock()
            .await
            .get_mut(&Self::route(method, path))
            .and_then(VecDeque::pop_front)
    }
}
