// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./voidbank.toml` > `~/.config/voidbank/voidbank.toml` >
//! `/etc/voidbank/voidbank.toml`, with `VOIDBANK_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VoidbankConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/voidbank/voidbank.toml`
/// 3. `~/.config/voidbank/voidbank.toml`
/// 4. `./voidbank.toml`
/// 5. `VOIDBANK_*` environment variables
pub fn load_config() -> Result<VoidbankConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VoidbankConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoidbankConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VoidbankConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoidbankConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(VoidbankConfig::default()))
        .merge(Toml::file("/etc/voidbank/voidbank.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("voidbank/voidbank.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("voidbank.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `VOIDBANK_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: keys such as
/// `min_solvency_buffer` contain underscores themselves. Figment passes the
/// key in its original case, so it is lowered before the section rewrite.
fn env_provider() -> Env {
    Env::prefixed("VOIDBANK_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("bank_", "bank.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("ledger_", "ledger.", 1)
            .replacen("pricing_", "pricing.", 1)
            .replacen("policy_", "policy.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VOIDBANK_POLICY_MIN_SOLVENCY_BUFFER", "25.5");
            jail.set_env("VOIDBANK_LEDGER_READ_CONSISTENCY", "serializable");
            let config: VoidbankConfig = Figment::new()
                .merge(Serialized::defaults(VoidbankConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.policy.min_solvency_buffer, 25.5);
            assert_eq!(
                config.ledger.read_consistency,
                crate::model::ReadConsistency::Serializable
            );
            Ok(())
        });
    }

    #[test]
    fn env_overrides_log_level() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VOIDBANK_BANK_LOG_LEVEL", "debug");
            jail.set_env("VOIDBANK_PRICING_CPU_LOAD_THRESHOLD", "70.0");
            let config: VoidbankConfig = Figment::new()
                .merge(Serialized::defaults(VoidbankConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.bank.log_level, "debug");
            assert_eq!(config.pricing.cpu_load_threshold, 70.0);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_precedence() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                "[policy]\nthermal_limit_celsius = 80.0\nmin_solvency_buffer = 5.0\n",
            )?;
            jail.set_env("VOIDBANK_POLICY_THERMAL_LIMIT_CELSIUS", "90.0");
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.policy.thermal_limit_celsius, 90.0);
            assert_eq!(config.policy.min_solvency_buffer, 5.0);
            Ok(())
        });
    }
}
