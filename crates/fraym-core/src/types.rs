// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Fraym proxy.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation thread on the assistant substrate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

/// Unique identifier for one run of the assistant against a thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

/// Unique identifier for a thread message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Assistant,
    Storage,
}

/// Lifecycle state of an assistant run, as reported by the substrate.
///
/// `Queued`, `InProgress` and `Cancelling` are collectively "pending";
/// everything else is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    Cancelling,
    Completed,
    Failed,
    Expired,
    Cancelled,
}

impl RunStatus {
    /// True while the run has not yet settled and must be polled again.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling
        )
    }

    /// True once the substrate will never change the state again.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

/// A single message from a thread, with its typed content blocks already
/// flattened to plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Substrate-assigned message identifier.
    pub id: MessageId,
    /// Role of the author ("user" or "assistant").
    pub role: String,
    /// Concatenated text of all text content blocks.
    pub text: String,
    /// Unix timestamp at which the substrate created the message.
    pub created_at: i64,
}

/// A cart item as it appears inside an assistant payload's desired-state
/// fragment. Exists only within one payload; the product id is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartItemDesired {
    /// Natural key of the item within one owner's cart.
    pub product_id: String,
    /// Display name.
    pub product_name: String,
    /// Desired quantity.
    pub quantity: u32,
    /// Price of a single unit.
    pub unit_price: f64,
    /// Price of the full line (quantity x unit price, as computed upstream).
    pub total_price: f64,
}

impl Default for CartItemDesired {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            product_name: String::new(),
            quantity: 1,
            unit_price: 0.0,
            total_price: 0.0,
        }
    }
}

/// A persisted cart item row. Created when a product is first desired for an
/// owner, updated when any field changes, deleted when absent from a later
/// desired snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Storage identifier (SQLite rowid).
    pub id: i64,
    /// The account the item belongs to.
    pub owner_id: String,
    /// Natural key within the owner's cart.
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl CartItem {
    /// True when every payload-visible field matches the desired item.
    /// The storage id, owner and timestamps are not part of the comparison.
    pub fn matches(&self, desired: &CartItemDesired) -> bool {
        self.product_name == desired.product_name
            && self.quantity == desired.quantity
            && self.unit_price == desired.unit_price
            && self.total_price == desired.total_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn run_status_pending_and_terminal_partition() {
        let pending = [RunStatus::Queued, RunStatus::InProgress, RunStatus::Cancelling];
        let terminal = [
            RunStatus::Completed,
            RunStatus::Failed,
            RunStatus::Expired,
            RunStatus::Cancelled,
        ];
        for s in pending {
            assert!(s.is_pending(), "{s} should be pending");
            assert!(!s.is_terminal());
        }
        for s in terminal {
            assert!(s.is_terminal(), "{s} should be terminal");
            assert!(!s.is_pending());
        }
    }

    #[test]
    fn run_status_wire_spelling_round_trips() {
        // The substrate reports snake_case strings.
        assert_eq!(RunStatus::InProgress.to_string(), "in_progress");
        assert_eq!(RunStatus::from_str("in_progress").unwrap(), RunStatus::InProgress);

        let json = serde_json::to_string(&RunStatus::Cancelling).unwrap();
        assert_eq!(json, "\"cancelling\"");
        let parsed: RunStatus = serde_json::from_str("\"expired\"").unwrap();
        assert_eq!(parsed, RunStatus::Expired);
    }

    #[test]
    fn desired_item_deserializes_camel_case_with_defaults() {
        let item: CartItemDesired =
            serde_json::from_str(r#"{"productId":"p1","unitPrice":2.5}"#).unwrap();
        assert_eq!(item.product_id, "p1");
        assert_eq!(item.product_name, "");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price, 2.5);
        assert_eq!(item.total_price, 0.0);
    }

    #[test]
    fn cart_item_matches_ignores_storage_fields() {
        let persisted = CartItem {
            id: 7,
            owner_id: "u1".into(),
            product_id: "p1".into(),
            product_name: "Apples".into(),
            quantity: 2,
            unit_price: 1.5,
            total_price: 3.0,
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        };
        let mut desired = CartItemDesired {
            product_id: "p1".into(),
            product_name: "Apples".into(),
            quantity: 2,
            unit_price: 1.5,
            total_price: 3.0,
        };
        assert!(persisted.matches(&desired));
        desired.quantity = 3;
        assert!(!persisted.matches(&desired));
    }
}
