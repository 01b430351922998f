//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the seam between the sans-IO `AdsClient` and real I/O.
//! `UreqTransport` drives a blocking `ureq` agent on tokio's blocking pool,
//! so callers only ever await. Status codes are returned as data; turning
//! them into errors is `AdsClient`'s job.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs a single HTTP round-trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `Transport` backed by a blocking `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::TransportError(e.to_string()))?
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = req.method.as_str(), url = %req.path, "sending request");

    let result = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match req.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(|e| {
        warn!(url = %req.path, error = %e, "request failed");
        ApiError::TransportError(e.to_string())
    })?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let body = response
        .body_mut()
        .read_to_vec()
        .map_err(|e| ApiError::TransportError(e.to_string()))?;

    debug!(status, bytes = body.len(), "received response");

    HttpResponse::from_bytes(status, headers, body)
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for unit tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Replays queued responses in order and records every request.
    ///
    /// When `gated`, each `execute` waits for one `release()` before
    /// answering.
    #[derive(Default)]
    pub(crate) struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
        gate: Option<Notify>,
    }

    impl ScriptedTransport {
        pub(crate) fn gated() -> Self {
            Self {
                gate: Some(Notify::new()),
                ..Self::default()
            }
        }

        pub(crate) fn push_json(&self, status: u16, body: impl Into<String>) {
            self.push(Ok(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.into(),
            }));
        }

        pub(crate) fn push(&self, response: Result<HttpResponse, ApiError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        pub(crate) fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(ApiError::TransportError("no scripted response".to_string()))
                })
        }
    }
}
