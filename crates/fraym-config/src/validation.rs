// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and non-zero poll bounds.

use crate::diagnostic::ConfigError;
use crate::model::FraymConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FraymConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.poll.interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "poll.interval_ms must be at least 1".to_string(),
        });
    }

    if config.poll.max_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "poll.max_attempts must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.openai.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "openai.api_key must not be empty when set".to_string(),
        });
    }

    if let Some(id) = &config.openai.assistant_id
        && id.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "openai.assistant_id must not be empty when set".to_string(),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PollConfig;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&FraymConfig::default()).is_ok());
    }

    #[test]
    fn zero_poll_bounds_are_rejected_together() {
        let config = FraymConfig {
            poll: PollConfig {
                interval_ms: 0,
                max_attempts: 0,
            },
            ..FraymConfig::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2, "both poll errors should be collected");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let mut config = FraymConfig::default();
        config.openai.api_key = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }
}
