use async_trait::async_trait;
use serde::Serialize;

use arbiter_common::types::Task;

use crate::error::DispatchError;

/// Outbound transport to one worker endpoint.
#[async_trait]
pub trait WorkerClient: Send + Sync {
    /// Sends the task to `{address}/generate` and returns the raw response
    /// body. The body is free-form text or JSON-wrapped text; interpreting
    /// it is the scorer's concern.
    async fn generate(&self, address: &str, task: &Task) -> Result<String, DispatchError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
    payload: &'a str,
}

/// reqwest-backed worker transport.
///
/// No client-level timeout is set here: the dispatcher enforces the per-call
/// timeout so that a slow worker is cancelled without touching the others.
#[derive(Clone, Default)]
pub struct HttpWorkerClient {
    client: reqwest::Client,
}

impl HttpWorkerClient {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

#[async_trait]
impl WorkerClient for HttpWorkerClient {
    async fn generate(&self, address: &str, task: &Task) -> Result<String, DispatchError> {
        let base = if address.contains("://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };
        let url = format!("{base}/generate");

        let body = GenerateRequest { topic: &task.topic, payload: &task.payload };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DispatchError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))
    }
}
