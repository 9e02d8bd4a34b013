// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::VoidbankConfig;

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &VoidbankConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&config.bank.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "bank.log_level must be one of {}, got `{}`",
                LEVELS.join(", "),
                config.bank.log_level
            ),
        });
    }

    let pricing = &config.pricing;
    for (key, value) in [
        ("pricing.critical_multiplier", pricing.critical_multiplier),
        ("pricing.warning_multiplier", pricing.warning_multiplier),
        ("pricing.load_multiplier", pricing.load_multiplier),
    ] {
        // A multiplier below 1 would make a stressed machine cheaper.
        if !value.is_finite() || value < 1.0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be a finite number >= 1.0, got {value}"),
            });
        }
    }
    if !(0.0..=100.0).contains(&pricing.cpu_load_threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "pricing.cpu_load_threshold must be within 0..=100, got {}",
                pricing.cpu_load_threshold
            ),
        });
    }

    let policy = &config.policy;
    if !policy.thermal_limit_celsius.is_finite() {
        errors.push(ConfigError::Validation {
            message: "policy.thermal_limit_celsius must be finite".to_string(),
        });
    }
    if !(policy.load_shedding_threshold > 0.0 && policy.load_shedding_threshold <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "policy.load_shedding_threshold must be in (0, 1], got {}",
                policy.load_shedding_threshold
            ),
        });
    }
    for (key, value) in [
        ("policy.min_solvency_buffer", policy.min_solvency_buffer),
        ("policy.high_priority_stake", policy.high_priority_stake),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be non-negative, got {value}"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
