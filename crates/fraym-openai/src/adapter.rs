// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Implementation of the AssistantAdapter trait over the HTTP client.

use async_trait::async_trait;

use fraym_config::model::OpenAiConfig;
use fraym_core::{
    AdapterType, AssistantAdapter, AssistantMessage, FraymError, HealthStatus, MessageId,
    PluginAdapter, RunId, RunStatus, ThreadId,
};

use crate::client::OpenAiClient;
use crate::types::MessageObject;

/// OpenAI Assistants substrate adapter.
///
/// Thin mapping layer from the wire objects of [`OpenAiClient`] to the
/// core types the rest of the proxy works with.
#[derive(Debug)]
pub struct OpenAiAssistant {
    client: OpenAiClient,
}

impl OpenAiAssistant {
    /// Builds the adapter from configuration.
    ///
    /// Fails when the API key or assistant id is missing: unlike the rest of
    /// the config, there is no workable default for credentials.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, FraymError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| FraymError::Config("openai.api_key is not set".into()))?;
        let assistant_id = config
            .assistant_id
            .as_deref()
            .ok_or_else(|| FraymError::Config("openai.assistant_id is not set".into()))?;
        let client = OpenAiClient::new(api_key, assistant_id, &config.base_url)?;
        Ok(Self { client })
    }

    /// Wraps an already-built client (used by tests).
    pub fn from_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

fn to_core_message(msg: MessageObject) -> AssistantMessage {
    AssistantMessage {
        id: MessageId(msg.id.clone()),
        role: msg.role.clone(),
        text: msg.text(),
        created_at: msg.created_at,
    }
}

#[async_trait]
impl PluginAdapter for OpenAiAssistant {
    fn name(&self) -> &str {
        "openai-assistants"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Assistant
    }

    async fn health_check(&self) -> Result<HealthStatus, FraymError> {
        // The substrate holds no local resources; reachability is only
        // established by real calls.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FraymError> {
        Ok(())
    }
}

#[async_trait]
impl AssistantAdapter for OpenAiAssistant {
    async fn create_thread(&self) -> Result<ThreadId, FraymError> {
        let thread = self.client.create_thread().await?;
        Ok(ThreadId(thread.id))
    }

    async fn add_message(
        &self,
        thread: &ThreadId,
        role: &str,
        content: &str,
    ) -> Result<MessageId, FraymError> {
        let msg = self.client.add_message(&thread.0, role, content).await?;
        Ok(MessageId(msg.id))
    }

    async fn create_run(&self, thread: &ThreadId) -> Result<RunId, FraymError> {
        let run = self.client.create_run(&thread.0).await?;
        Ok(RunId(run.id))
    }

    async fn run_status(&self, thread: &ThreadId, run: &RunId) -> Result<RunStatus, FraymError> {
        let run = self.client.retrieve_run(&thread.0, &run.0).await?;
        Ok(run.status)
    }

    async fn latest_message(
        &self,
        thread: &ThreadId,
    ) -> Result<Option<AssistantMessage>, FraymError> {
        let list = self.client.list_messages(&thread.0, "desc", 1).await?;
        Ok(list.data.into_iter().next().map(to_core_message))
    }

    async fn list_messages(
        &self,
        thread: &ThreadId,
        limit: u32,
    ) -> Result<Vec<AssistantMessage>, FraymError> {
        let list = self.client.list_messages(&thread.0, "asc", limit).await?;
        Ok(list.data.into_iter().map(to_core_message).collect())
    }
}
