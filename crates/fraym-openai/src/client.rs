// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Assistants v2 API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and transient error retry for the thread, message,
//! and run endpoints.

use std::time::Duration;

use fraym_core::FraymError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{
    ApiErrorResponse, CreateMessageRequest, CreateRunRequest, MessageList, MessageObject,
    RunObject, ThreadObject,
};

/// HTTP client for OpenAI Assistants API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    assistant_id: String,
    max_retries: u32,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new Assistants API client.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key used as the bearer token
    /// * `assistant_id` - Assistant every run is started against
    /// * `base_url` - API base (e.g., "https://api.openai.com/v1")
    pub fn new(api_key: &str, assistant_id: &str, base_url: &str) -> Result<Self, FraymError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                FraymError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("openai-beta", HeaderValue::from_static("assistants=v2"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FraymError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            assistant_id: assistant_id.to_string(),
            max_retries: 1,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the configured assistant identifier.
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Creates a new, empty thread.
    pub async fn create_thread(&self) -> Result<ThreadObject, FraymError> {
        let url = format!("{}/threads", self.base_url);
        self.execute(reqwest::Method::POST, &url, Some(serde_json::json!({})))
            .await
    }

    /// Appends a role-tagged text message to a thread.
    pub async fn add_message(
        &self,
        thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<MessageObject, FraymError> {
        let url = format!("{}/threads/{thread_id}/messages", self.base_url);
        let body = CreateMessageRequest {
            role: role.to_string(),
            content: content.to_string(),
        };
        self.execute(
            reqwest::Method::POST,
            &url,
            Some(serde_json::to_value(body).map_err(|e| FraymError::Internal(e.to_string()))?),
        )
        .await
    }

    /// Starts a run of the configured assistant against a thread.
    pub async fn create_run(&self, thread_id: &str) -> Result<RunObject, FraymError> {
        let url = format!("{}/threads/{thread_id}/runs", self.base_url);
        let body = CreateRunRequest {
            assistant_id: self.assistant_id.clone(),
        };
        self.execute(
            reqwest::Method::POST,
            &url,
            Some(serde_json::to_value(body).map_err(|e| FraymError::Internal(e.to_string()))?),
        )
        .await
    }

    /// Retrieves the current state of a run.
    pub async fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunObject, FraymError> {
        let url = format!("{}/threads/{thread_id}/runs/{run_id}", self.base_url);
        self.execute(reqwest::Method::GET, &url, None).await
    }

    /// Lists thread messages, newest or oldest first.
    pub async fn list_messages(
        &self,
        thread_id: &str,
        order: &str,
        limit: u32,
    ) -> Result<MessageList, FraymError> {
        let url = format!(
            "{}/threads/{thread_id}/messages?order={order}&limit={limit}",
            self.base_url
        );
        self.execute(reqwest::Method::GET, &url, None).await
    }

    /// Sends one API request and decodes the JSON response.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    async fn execute<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, FraymError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, url, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let mut req = self.client.request(method.clone(), url);
            if let Some(body) = &body {
                req = req.json(body);
            }

            let response = req.send().await.map_err(|e| FraymError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

            let status = response.status();
            debug!(status = %status, attempt, url, "response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| FraymError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| FraymError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(FraymError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(FraymError::Provider {
                message: error_msg,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| FraymError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("sk-test-key", "asst_test", "https://unused.invalid/v1")
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn run_body(status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "run_1",
            "object": "thread.run",
            "thread_id": "thread_1",
            "status": status,
            "created_at": 1700000000
        })
    }

    #[tokio::test]
    async fn create_thread_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "thread_1",
                "object": "thread",
                "created_at": 1700000000
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let thread = client.create_thread().await.unwrap();
        assert_eq!(thread.id, "thread_1");
    }

    #[tokio::test]
    async fn add_message_posts_role_and_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads/thread_1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "role": "user",
                "created_at": 1700000000,
                "content": [{"type": "text", "text": {"value": "hi"}}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let msg = client.add_message("thread_1", "user", "hi").await.unwrap();
        assert_eq!(msg.id, "msg_1");
        assert_eq!(msg.text(), "hi");
    }

    #[tokio::test]
    async fn create_run_sends_assistant_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads/thread_1/runs"))
            .and(wiremock::matchers::body_json(serde_json::json!({
                "assistant_id": "asst_test"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("queued")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let run = client.create_run("thread_1").await.unwrap();
        assert_eq!(run.id, "run_1");
        assert!(run.status.is_pending());
    }

    #[tokio::test]
    async fn retrieve_run_retries_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(run_body("completed")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let run = client.retrieve_run("thread_1", "run_1").await.unwrap();
        assert_eq!(run.status, fraym_core::RunStatus::Completed);
    }

    #[tokio::test]
    async fn list_messages_passes_order_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/messages"))
            .and(query_param("order", "desc"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [{
                    "id": "msg_9",
                    "role": "assistant",
                    "created_at": 1700000000,
                    "content": [{"type": "text", "text": {"value": "answer"}}]
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let list = client.list_messages("thread_1", "desc", 1).await.unwrap();
        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].text(), "answer");
    }

    #[tokio::test]
    async fn api_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"type": "invalid_request_error", "message": "No such assistant"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.create_thread().await.unwrap_err();
        assert!(err.to_string().contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_auth_and_beta_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .and(header("authorization", "Bearer sk-test-key"))
            .and(header("openai-beta", "assistants=v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "thread_h",
                "created_at": 1
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_thread().await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn exhausted_retries_on_503_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
                "error": {"type": "overloaded_error", "message": "try later"}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_thread().await;
        assert!(result.is_err());
    }
}
