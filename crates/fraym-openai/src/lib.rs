// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Assistants API adapter for the Fraym proxy.
//!
//! Wraps the Assistants v2 thread/message/run endpoints behind the core
//! [`fraym_core::AssistantAdapter`] trait. Streaming delivery is
//! deliberately not implemented; the proxy polls runs to completion.

pub mod adapter;
pub mod client;
pub mod types;

pub use adapter::OpenAiAssistant;
pub use client::OpenAiClient;
