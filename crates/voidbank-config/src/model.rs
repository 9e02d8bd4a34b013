// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Voidbank.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Voidbank configuration.
///
/// Every section is optional and falls back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoidbankConfig {
    /// Process-level settings.
    #[serde(default)]
    pub bank: BankConfig,

    /// Ledger database settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Ledger consistency settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Hardware-sensitive pricing multipliers.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Admission control thresholds.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BankConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the ledger database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("voidbank").join("compute_ledger.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("compute_ledger.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// How balance reads relate to the ledger's mutation lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadConsistency {
    /// Reads skip the mutation lock. They always see a committed balance but
    /// may miss a mutation that is queued behind the lock.
    #[default]
    Snapshot,
    /// Reads take the mutation lock and are ordered with every credit/debit.
    Serializable,
}

/// Ledger configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Read consistency for `get_balance` and other audit reads.
    #[serde(default)]
    pub read_consistency: ReadConsistency,
}

/// Hardware multipliers applied on top of an operation's shaped cost.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Multiplier while the thermal status is critical.
    #[serde(default = "default_critical_multiplier")]
    pub critical_multiplier: f64,

    /// Multiplier while the thermal status is warning.
    #[serde(default = "default_warning_multiplier")]
    pub warning_multiplier: f64,

    /// CPU load (percent) above which the load multiplier applies.
    #[serde(default = "default_cpu_load_threshold")]
    pub cpu_load_threshold: f64,

    /// Multiplier composed on top of the thermal one under high CPU load.
    #[serde(default = "default_load_multiplier")]
    pub load_multiplier: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            critical_multiplier: default_critical_multiplier(),
            warning_multiplier: default_warning_multiplier(),
            cpu_load_threshold: default_cpu_load_threshold(),
            load_multiplier: default_load_multiplier(),
        }
    }
}

fn default_critical_multiplier() -> f64 {
    100.0
}

fn default_warning_multiplier() -> f64 {
    2.0
}

fn default_cpu_load_threshold() -> f64 {
    80.0
}

fn default_load_multiplier() -> f64 {
    1.5
}

/// Admission control configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Temperature (Celsius) above which every operation is denied.
    #[serde(default = "default_thermal_limit_celsius")]
    pub thermal_limit_celsius: f64,

    /// Peak load fraction (0.0-1.0) above which low-priority work is shed.
    #[serde(default = "default_load_shedding_threshold")]
    pub load_shedding_threshold: f64,

    /// Credits that must remain after the estimated cost for admission.
    #[serde(default = "default_min_solvency_buffer")]
    pub min_solvency_buffer: f64,

    /// Advisory stake for priorities at or above LIVE_GAME_STATE.
    #[serde(default = "default_high_priority_stake")]
    pub high_priority_stake: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            thermal_limit_celsius: default_thermal_limit_celsius(),
            load_shedding_threshold: default_load_shedding_threshold(),
            min_solvency_buffer: default_min_solvency_buffer(),
            high_priority_stake: default_high_priority_stake(),
        }
    }
}

fn default_thermal_limit_celsius() -> f64 {
    85.0
}

fn default_load_shedding_threshold() -> f64 {
    0.90
}

fn default_min_solvency_buffer() -> f64 {
    10.0
}

fn default_high_priority_stake() -> f64 {
    50.0
}
