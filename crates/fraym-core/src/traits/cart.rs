// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart store trait: the keyed persisted-record store the reconciler
//! diffs desired snapshots against.

use async_trait::async_trait;

use crate::error::FraymError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CartItem, CartItemDesired};

/// Adapter for the persisted cart-item store.
///
/// Items are scoped to an owner and keyed by product id within that scope;
/// the backend enforces that no two rows share an (owner, product) pair.
#[async_trait]
pub trait CartStore: PluginAdapter {
    /// Lists all persisted items belonging to one owner.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<CartItem>, FraymError>;

    /// Deletes a set of items by storage id in one batched statement.
    async fn delete_by_ids(&self, ids: &[i64]) -> Result<(), FraymError>;

    /// Inserts a new item for an owner from a desired descriptor.
    async fn create(&self, owner_id: &str, item: &CartItemDesired) -> Result<(), FraymError>;

    /// Overwrites all payload-visible fields of an existing item.
    async fn update(&self, id: i64, item: &CartItemDesired) -> Result<(), FraymError>;
}
