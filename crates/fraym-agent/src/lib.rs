// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run orchestration core for the Fraym assistant proxy.
//!
//! Composes four stages into one operation:
//! - **extract**: isolate a structured-data candidate from fenced output
//! - **repair**: normalize near-valid JSON, all-or-nothing
//! - **poller**: drive an assistant run to a terminal state under a bound
//! - **reconcile**: minimal-write diff of a desired cart snapshot against
//!   the persisted store
//!
//! Each orchestrated run is one sequential flow; concurrent flows share
//! nothing but the cart store. Concurrent reconciliations for the same
//! owner are not mutually excluded -- the store is read then written without
//! a spanning transaction, which is an accepted best-effort trade-off.

pub mod extract;
pub mod orchestrator;
pub mod poller;
pub mod reconcile;
pub mod repair;

pub use extract::extract_payload;
pub use orchestrator::{AssistantReply, Orchestrator};
pub use poller::RunPoller;
pub use reconcile::{plan, CartReconciler, ReconciliationPlan};
pub use repair::{recover_payload, repair_payload, RecoveredPayload};
