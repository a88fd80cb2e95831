// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart reconciliation: minimal-write diff of a desired snapshot against
//! the persisted store.
//!
//! Planning is pure and separately testable; application is best-effort.
//! A persistence error on one step is logged and the remaining steps still
//! run, so partial application is possible -- the returned flag reflects
//! only what actually succeeded.

use std::collections::HashMap;
use std::sync::Arc;

use fraym_core::{CartItem, CartItemDesired, CartStore};
use tracing::{debug, warn};

/// The three disjoint write sets derived from one owner's snapshot diff.
///
/// Derived, never stored. Keys are product ids; deletes carry storage ids
/// because that is what the batched delete operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan {
    /// Desired items with no persisted counterpart.
    pub create: Vec<CartItemDesired>,
    /// Persisted storage id paired with the differing desired fields.
    pub update: Vec<(i64, CartItemDesired)>,
    /// Storage ids of persisted items absent from the desired snapshot.
    pub delete: Vec<i64>,
}

impl ReconciliationPlan {
    /// True when applying the plan would perform no writes.
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// Compute the minimal-write plan aligning `persisted` with `desired`.
///
/// Both sides are indexed by product id. Deletion is decided strictly by key
/// absence and never by field values. An item already persisted with equal
/// fields produces no write at all. When the snapshot repeats a product id,
/// the later entry replaces the earlier one.
pub fn plan(persisted: &[CartItem], desired: &[CartItemDesired]) -> ReconciliationPlan {
    let persisted_by_product: HashMap<&str, &CartItem> = persisted
        .iter()
        .map(|item| (item.product_id.as_str(), item))
        .collect();

    let mut desired_by_product: HashMap<&str, &CartItemDesired> = HashMap::new();
    let mut desired_order: Vec<&str> = Vec::new();
    for item in desired {
        if desired_by_product
            .insert(item.product_id.as_str(), item)
            .is_none()
        {
            desired_order.push(item.product_id.as_str());
        }
    }

    let mut plan = ReconciliationPlan::default();

    for item in persisted {
        if !desired_by_product.contains_key(item.product_id.as_str()) {
            plan.delete.push(item.id);
        }
    }

    for product_id in desired_order {
        let item = desired_by_product[product_id];
        match persisted_by_product.get(product_id) {
            None => plan.create.push(item.clone()),
            Some(existing) if !existing.matches(item) => {
                plan.update.push((existing.id, item.clone()));
            }
            Some(_) => {} // identical, no write
        }
    }

    plan
}

/// Applies reconciliation plans against a persisted cart store.
pub struct CartReconciler {
    store: Arc<dyn CartStore>,
}

impl CartReconciler {
    /// Creates a reconciler over the given store.
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }

    /// Brings the owner's persisted cart into alignment with the desired
    /// snapshot, returning whether any write occurred.
    ///
    /// Idempotent: applying the same snapshot twice performs zero writes the
    /// second time. Only rows of `owner_id` are ever touched. Persistence
    /// errors are logged and skipped rather than aborting the remaining
    /// steps; availability is favored over atomicity here.
    pub async fn reconcile(&self, owner_id: &str, desired: &[CartItemDesired]) -> bool {
        let persisted = match self.store.list_for_owner(owner_id).await {
            Ok(items) => items,
            Err(e) => {
                warn!(owner_id, error = %e, "failed to load persisted cart, skipping reconciliation");
                return false;
            }
        };

        let plan = plan(&persisted, desired);
        if plan.is_empty() {
            debug!(owner_id, "cart already in desired state");
            return false;
        }

        let mut updated = false;

        if !plan.delete.is_empty() {
            match self.store.delete_by_ids(&plan.delete).await {
                Ok(()) => updated = true,
                Err(e) => warn!(owner_id, error = %e, "batched cart delete failed"),
            }
        }

        for item in &plan.create {
            match self.store.create(owner_id, item).await {
                Ok(()) => updated = true,
                Err(e) => {
                    warn!(owner_id, product_id = %item.product_id, error = %e, "cart create failed");
                }
            }
        }

        for (id, item) in &plan.update {
            match self.store.update(*id, item).await {
                Ok(()) => updated = true,
                Err(e) => {
                    warn!(owner_id, product_id = %item.product_id, error = %e, "cart update failed");
                }
            }
        }

        debug!(
            owner_id,
            created = plan.create.len(),
            updated_rows = plan.update.len(),
            deleted = plan.delete.len(),
            any_write = updated,
            "cart reconciliation applied"
        );
        updated
    }
}
