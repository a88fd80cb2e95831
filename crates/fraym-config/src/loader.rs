// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./fraym.toml` > `~/.config/fraym/fraym.toml` > `/etc/fraym/fraym.toml`
//! with environment variable overrides via `FRAYM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::FraymConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/fraym/fraym.toml` (system-wide)
/// 3. `~/.config/fraym/fraym.toml` (user XDG config)
/// 4. `./fraym.toml` (local directory)
/// 5. `FRAYM_*` environment variables
pub fn load_config() -> Result<FraymConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FraymConfig::default()))
        .merge(Toml::file("/etc/fraym/fraym.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("fraym/fraym.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("fraym.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<FraymConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FraymConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FraymConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FraymConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `FRAYM_OPENAI_API_KEY` must
/// map to `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("FRAYM_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: FRAYM_OPENAI_API_KEY -> "openai_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("poll_", "poll.", 1);
        mapped.into()
    })
}
