// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded fixed-interval polling of an assistant run to a terminal state.
//!
//! The poll loop is the only intentional suspension point of an orchestrated
//! flow: between status checks it sleeps without blocking other concurrent
//! flows. The poller never mutates persisted state, and a bound-exceeded
//! poll does not cancel the remote run -- it simply stops watching it.

use std::sync::Arc;
use std::time::Duration;

use fraym_config::model::PollConfig;
use fraym_core::{AssistantAdapter, AssistantMessage, FraymError, RunId, RunStatus, ThreadId};
use tracing::{debug, warn};

/// Drives an externally-identified run through its lifecycle states.
pub struct RunPoller {
    assistant: Arc<dyn AssistantAdapter>,
    config: PollConfig,
}

impl RunPoller {
    /// Creates a poller over the given substrate with explicit poll bounds.
    pub fn new(assistant: Arc<dyn AssistantAdapter>, config: PollConfig) -> Self {
        Self { assistant, config }
    }

    /// Polls the run until it completes, fails, or the attempt bound is hit.
    ///
    /// On `completed` the thread's newest message is fetched and must be an
    /// assistant reply; anything else is a protocol violation
    /// ([`FraymError::NoAssistantReply`]). Any other terminal state maps to
    /// [`FraymError::RunFailed`]; exhausting the bound while still pending
    /// maps to [`FraymError::RunTimeout`].
    pub async fn await_completion(
        &self,
        thread: &ThreadId,
        run: &RunId,
    ) -> Result<AssistantMessage, FraymError> {
        let interval = Duration::from_millis(self.config.interval_ms);

        for attempt in 0..self.config.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(interval).await;
            }

            let status = self.assistant.run_status(thread, run).await?;
            debug!(run = %run.0, %status, attempt, "run status check");

            if status.is_pending() {
                continue;
            }

            return match status {
                RunStatus::Completed => self.fetch_reply(thread).await,
                state => Err(FraymError::RunFailed { state }),
            };
        }

        warn!(
            run = %run.0,
            attempts = self.config.max_attempts,
            "run still pending after poll bound, giving up"
        );
        Err(FraymError::RunTimeout {
            attempts: self.config.max_attempts,
        })
    }

    /// Fetches the newest thread message and verifies it is an assistant reply.
    async fn fetch_reply(&self, thread: &ThreadId) -> Result<AssistantMessage, FraymError> {
        match self.assistant.latest_message(thread).await? {
            Some(message) if message.role == "assistant" => Ok(message),
            Some(message) => {
                warn!(role = %message.role, "newest message after completed run is not from the assistant");
                Err(FraymError::NoAssistantReply)
            }
            None => Err(FraymError::NoAssistantReply),
        }
    }
}
