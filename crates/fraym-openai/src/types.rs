// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Assistants v2 API request/response types.

use fraym_core::RunStatus;
use serde::{Deserialize, Serialize};

// --- Request types ---

/// Body for `POST /threads/{id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    /// Role of the author ("user" or "assistant").
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Body for `POST /threads/{id}/runs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    /// The assistant to execute against the thread.
    pub assistant_id: String,
}

// --- Response types ---

/// A conversation thread object.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    /// Thread identifier (e.g., "thread_abc123").
    pub id: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

/// A run object, returned on creation and retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    /// Run identifier (e.g., "run_abc123").
    pub id: String,
    /// The thread the run executes against.
    pub thread_id: String,
    /// Current lifecycle state.
    pub status: RunStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

/// A thread message object.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    /// Message identifier (e.g., "msg_abc123").
    pub id: String,
    /// Role of the author.
    pub role: String,
    /// Typed content blocks.
    pub content: Vec<ContentBlock>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl MessageObject {
    /// Concatenates the values of all text content blocks.
    ///
    /// Non-text blocks (images, files) carry no payload for this proxy and
    /// are skipped.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ContentBlock::Text { text } = block {
                out.push_str(&text.value);
            }
        }
        out
    }
}

/// A typed content block within a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content block.
    #[serde(rename = "text")]
    Text { text: TextValue },
    /// Any other block type (image_file, image_url, ...).
    #[serde(other)]
    Other,
}

/// The value container of a text content block.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    /// The actual text.
    pub value: String,
}

/// List envelope returned by `GET /threads/{id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageList {
    /// Messages in the requested order.
    pub data: Vec<MessageObject>,
}

// --- Error types ---

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Details of an API error.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Error category (e.g., "invalid_request_error").
    #[serde(rename = "type")]
    pub type_: String,
    /// Human-readable message.
    pub message: String,
}
