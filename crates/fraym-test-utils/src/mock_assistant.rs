// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock assistant substrate for deterministic testing.
//!
//! `MockAssistant` implements `AssistantAdapter` with a scripted sequence of
//! run states and a configurable latest message, enabling fast, CI-runnable
//! tests without external API calls.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use fraym_core::{
    AdapterType, AssistantAdapter, AssistantMessage, FraymError, HealthStatus, MessageId,
    PluginAdapter, RunId, RunStatus, ThreadId,
};

/// A mock substrate that replays a scripted run-state sequence.
///
/// States are popped from a FIFO queue on each status check; when the queue
/// is exhausted the last popped state repeats, so a script ending in
/// `InProgress` simulates a run that never settles.
pub struct MockAssistant {
    statuses: Arc<Mutex<VecDeque<RunStatus>>>,
    last_status: Arc<Mutex<RunStatus>>,
    latest: Arc<Mutex<Option<AssistantMessage>>>,
    status_checks: AtomicU32,
    messages_added: AtomicU32,
}

impl MockAssistant {
    /// Create a mock whose runs complete immediately.
    pub fn new() -> Self {
        Self::with_statuses(vec![RunStatus::Completed])
    }

    /// Create a mock replaying the given state sequence.
    pub fn with_statuses(statuses: Vec<RunStatus>) -> Self {
        let last = statuses.last().copied().unwrap_or(RunStatus::Completed);
        Self {
            statuses: Arc::new(Mutex::new(VecDeque::from(statuses))),
            last_status: Arc::new(Mutex::new(last)),
            latest: Arc::new(Mutex::new(None)),
            status_checks: AtomicU32::new(0),
            messages_added: AtomicU32::new(0),
        }
    }

    /// Configure the message returned as the thread's newest one.
    pub async fn set_latest_message(&self, role: &str, text: &str) {
        *self.latest.lock().await = Some(AssistantMessage {
            id: MessageId("msg_mock".to_string()),
            role: role.to_string(),
            text: text.to_string(),
            created_at: 1_700_000_000,
        });
    }

    /// Number of run status checks performed so far.
    pub fn status_checks(&self) -> u32 {
        self.status_checks.load(Ordering::SeqCst)
    }

    /// Number of messages appended through the adapter.
    pub fn messages_added(&self) -> u32 {
        self.messages_added.load(Ordering::SeqCst)
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockAssistant {
    fn name(&self) -> &str {
        "mock-assistant"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Assistant
    }

    async fn health_check(&self) -> Result<HealthStatus, FraymError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FraymError> {
        Ok(())
    }
}

#[async_trait]
impl AssistantAdapter for MockAssistant {
    async fn create_thread(&self) -> Result<ThreadId, FraymError> {
        Ok(ThreadId("thread_mock".to_string()))
    }

    async fn add_message(
        &self,
        _thread: &ThreadId,
        _role: &str,
        _content: &str,
    ) -> Result<MessageId, FraymError> {
        let n = self.messages_added.fetch_add(1, Ordering::SeqCst);
        Ok(MessageId(format!("msg_mock_{n}")))
    }

    async fn create_run(&self, _thread: &ThreadId) -> Result<RunId, FraymError> {
        Ok(RunId("run_mock".to_string()))
    }

    async fn run_status(&self, _thread: &ThreadId, _run: &RunId) -> Result<RunStatus, FraymError> {
        self.status_checks.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.statuses.lock().await;
        match queue.pop_front() {
            Some(status) => {
                *self.last_status.lock().await = status;
                Ok(status)
            }
            None => Ok(*self.last_status.lock().await),
        }
    }

    async fn latest_message(
        &self,
        _thread: &ThreadId,
    ) -> Result<Option<AssistantMessage>, FraymError> {
        Ok(self.latest.lock().await.clone())
    }

    async fn list_messages(
        &self,
        thread: &ThreadId,
        _limit: u32,
    ) -> Result<Vec<AssistantMessage>, FraymError> {
        Ok(self.latest_message(thread).await?.into_iter().collect())
    }
}
