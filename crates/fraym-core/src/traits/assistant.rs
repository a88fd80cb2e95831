// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant substrate trait: the external generation-job API the proxy
//! drives (threads, role-tagged messages, asynchronous runs).

use async_trait::async_trait;

use crate::error::FraymError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AssistantMessage, MessageId, RunId, RunStatus, ThreadId};

/// Adapter for the external assistant job substrate.
///
/// The substrate owns all conversation state: the proxy only appends content,
/// starts runs, polls their status, and reads messages back. Nothing here
/// mutates local persisted state.
#[async_trait]
pub trait AssistantAdapter: PluginAdapter {
    /// Creates a new, empty conversation thread.
    async fn create_thread(&self) -> Result<ThreadId, FraymError>;

    /// Appends a role-tagged text message to a thread.
    async fn add_message(
        &self,
        thread: &ThreadId,
        role: &str,
        content: &str,
    ) -> Result<MessageId, FraymError>;

    /// Starts a run of the configured assistant against a thread.
    async fn create_run(&self, thread: &ThreadId) -> Result<RunId, FraymError>;

    /// Fetches the current lifecycle state of a run.
    async fn run_status(&self, thread: &ThreadId, run: &RunId) -> Result<RunStatus, FraymError>;

    /// Fetches the most recent message of a thread, if any.
    async fn latest_message(
        &self,
        thread: &ThreadId,
    ) -> Result<Option<AssistantMessage>, FraymError>;

    /// Fetches up to `limit` messages of a thread in chronological order.
    async fn list_messages(
        &self,
        thread: &ThreadId,
        limit: u32,
    ) -> Result<Vec<AssistantMessage>, FraymError>;
}
