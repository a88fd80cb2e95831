// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The orchestration facade: advance a run, recover its structured answer,
//! reconcile any embedded desired cart state, and return the user-facing
//! text.
//!
//! Error policy (deliberately asymmetric): poller and protocol errors abort
//! the call and surface to the caller; extraction, repair and reconciliation
//! problems degrade locally. Malformed assistant output must never block the
//! user from seeing an answer.

use std::sync::Arc;

use fraym_config::model::PollConfig;
use fraym_core::{
    AssistantAdapter, CartItemDesired, CartStore, FraymError, MessageId, RunId, ThreadId,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::poller::RunPoller;
use crate::reconcile::CartReconciler;
use crate::repair::{recover_payload, RecoveredPayload};

/// Payload key carrying the embedded desired-state fragment.
const DESIRED_STATE_KEY: &str = "desiredState";
/// Key of the cart snapshot inside the desired-state fragment.
const CART_KEY: &str = "cart";
/// Payload key of the optional suggestion scalar.
const SUGGESTION_KEY: &str = "suggestion";
/// Key of the reconciliation-outcome flag inserted into the outward payload.
const CART_UPDATED_KEY: &str = "cart_updated";

/// The caller-facing result of one orchestrated run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Final answer text: the re-serialized structured payload, or the raw
    /// output verbatim when no payload could be recovered.
    pub text: String,
    /// Identifier of the message the answer came from, for persistence by
    /// the caller.
    pub message_id: MessageId,
    /// Suggestion extracted (and removed) from the structured payload.
    pub suggestion: Option<String>,
}

/// Composes the poller, payload recovery, and cart reconciliation into one
/// operation over an already-started run.
pub struct Orchestrator {
    poller: RunPoller,
    reconciler: CartReconciler,
}

impl Orchestrator {
    /// Creates an orchestrator over explicit substrate and store handles.
    pub fn new(
        assistant: Arc<dyn AssistantAdapter>,
        store: Arc<dyn CartStore>,
        poll: PollConfig,
    ) -> Self {
        Self {
            poller: RunPoller::new(assistant, poll),
            reconciler: CartReconciler::new(store),
        }
    }

    /// Drives the run to completion and post-processes its answer.
    ///
    /// The run must already exist and the thread must already carry the new
    /// user content. `owner_id` scopes any cart reconciliation triggered by
    /// the payload.
    pub async fn run_to_reply(
        &self,
        thread: &ThreadId,
        run: &RunId,
        owner_id: &str,
    ) -> Result<AssistantReply, FraymError> {
        let message = self.poller.await_completion(thread, run).await?;
        let raw = message.text;

        let mut value = match recover_payload(&raw) {
            RecoveredPayload::Parsed(value) => value,
            RecoveredPayload::Unparseable => {
                info!(run = %run.0, "no structured payload recovered, returning raw output");
                return Ok(AssistantReply {
                    text: raw,
                    message_id: message.id,
                    suggestion: None,
                });
            }
        };

        let mut suggestion = None;
        if let Value::Object(map) = &mut value {
            suggestion = take_suggestion(map);

            if let Some(cart) = take_desired_cart(map) {
                let desired = parse_desired_items(&cart);
                let updated = self.reconciler.reconcile(owner_id, &desired).await;
                map.insert(CART_UPDATED_KEY.to_string(), Value::Bool(updated));
            }
        }

        let text =
            serde_json::to_string(&value).map_err(|e| FraymError::Internal(e.to_string()))?;
        Ok(AssistantReply {
            text,
            message_id: message.id,
            suggestion,
        })
    }
}

/// Remove and return the suggestion field when it carries a string.
///
/// Non-string suggestions are left in the payload untouched; the field is
/// specified as a scalar string and anything else is not worth guessing at.
fn take_suggestion(map: &mut serde_json::Map<String, Value>) -> Option<String> {
    match map.get(SUGGESTION_KEY) {
        Some(Value::String(_)) => match map.remove(SUGGESTION_KEY) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        _ => None,
    }
}

/// Remove and return the `desiredState.cart` array, when present.
fn take_desired_cart(map: &mut serde_json::Map<String, Value>) -> Option<Vec<Value>> {
    let desired_state = map.get_mut(DESIRED_STATE_KEY)?.as_object_mut()?;
    match desired_state.remove(CART_KEY)? {
        Value::Array(items) => Some(items),
        other => {
            // A non-array cart is dropped from the payload but triggers no
            // reconciliation.
            warn!(got = %value_kind(&other), "desired cart fragment is not an array, ignoring");
            None
        }
    }
}

/// Decode cart entries tolerantly: entries that do not look like cart items
/// are skipped, missing fields take their defaults.
fn parse_desired_items(entries: &[Value]) -> Vec<CartItemDesired> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<CartItemDesired>(entry.clone()) {
            Ok(item) => items.push(item),
            Err(e) => {
                debug!(error = %e, "skipping malformed cart entry");
            }
        }
    }
    items
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
