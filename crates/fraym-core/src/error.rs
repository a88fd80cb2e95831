// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Fraym assistant proxy.

use thiserror::Error;

use crate::types::RunStatus;

/// The primary error type used across all Fraym adapter traits and core operations.
#[derive(Debug, Error)]
pub enum FraymError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Assistant substrate errors (API failure, malformed response, transport).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The poll bound was exceeded while the run was still pending.
    #[error("run still pending after {attempts} status checks")]
    RunTimeout { attempts: u32 },

    /// The run reached a terminal state other than `completed`.
    #[error("run ended in terminal state `{state}`")]
    RunFailed { state: RunStatus },

    /// The run completed but the newest thread message was not an assistant reply.
    #[error("run completed but no assistant reply was found")]
    NoAssistantReply,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
