// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Fraym assistant proxy.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Fraym workspace. The assistant substrate
//! and storage adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FraymError;
pub use types::{
    AdapterType, AssistantMessage, CartItem, CartItemDesired, HealthStatus, MessageId, RunId,
    RunStatus, ThreadId,
};

// Re-export adapter traits at crate root.
pub use traits::{AssistantAdapter, CartStore, PluginAdapter};
