// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the ledger, pricing, and admission crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Health status reported by storage probes and the integrity report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    /// Fully operational.
    Healthy,
    /// Operational but experiencing issues.
    Degraded(String),
    /// Not operational.
    Unhealthy(String),
}

/// Coarse thermal classification of the compute hardware.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ThermalStatus {
    #[default]
    Nominal,
    Warning,
    Critical,
}

/// An immutable point-in-time reading of the shared hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareSnapshot {
    /// CPU utilisation, percent (0-100).
    pub cpu_load: f64,
    /// GPU utilisation, percent (0-100).
    pub gpu_load: f64,
    /// CPU temperature, degrees Celsius.
    pub cpu_temp: f64,
    /// GPU temperature, degrees Celsius.
    pub gpu_temp: f64,
    /// Platform thermal classification.
    #[serde(default)]
    pub thermal_status: ThermalStatus,
}

impl HardwareSnapshot {
    /// A cool, idle machine.
    pub fn nominal() -> Self {
        Self {
            cpu_load: 0.0,
            gpu_load: 0.0,
            cpu_temp: 45.0,
            gpu_temp: 40.0,
            thermal_status: ThermalStatus::Nominal,
        }
    }

    /// Hottest of the CPU and GPU temperatures.
    pub fn peak_temp(&self) -> f64 {
        self.cpu_temp.max(self.gpu_temp)
    }

    /// Busiest of the CPU and GPU loads, as a fraction (0.0-1.0).
    pub fn peak_load_fraction(&self) -> f64 {
        self.cpu_load.max(self.gpu_load) / 100.0
    }
}

/// Scheduling priority of a requested operation.
///
/// Only used for ordering comparisons when shedding load; declaration order
/// is the priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    BackgroundSimulation,
    StandardOperation,
    LiveGameState,
    SystemCritical,
}

/// The closed set of billable engine operations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Board-state heuristic generation.
    BshGeneration,
    /// Deep model evaluation of a position.
    DmfEvaluation,
    /// Alpha-beta tree search; priced exponentially in depth.
    AlphaBetaSearch,
    /// One training batch for the oracle model.
    OracleTrainingBatch,
}

impl OperationType {
    /// Base price in compute credits before shaping and hardware multipliers.
    pub const fn base_cost(self) -> f64 {
        match self {
            Self::BshGeneration => 1.0,
            Self::DmfEvaluation => 5.0,
            Self::AlphaBetaSearch => 2.0,
            Self::OracleTrainingBatch => 500.0,
        }
    }

    /// Action type string recorded in the transaction log.
    pub fn action_type(self) -> String {
        self.to_string()
    }
}

/// Operation-specific shaping parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationParams {
    /// Search depth; read only by [`OperationType::AlphaBetaSearch`]. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl OperationParams {
    pub fn with_depth(depth: u32) -> Self {
        Self { depth: Some(depth) }
    }

    /// Effective search depth.
    pub fn depth(&self) -> u32 {
        self.depth.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn priority_levels_are_ordered() {
        assert!(PriorityLevel::BackgroundSimulation < PriorityLevel::StandardOperation);
        assert!(PriorityLevel::StandardOperation < PriorityLevel::LiveGameState);
        assert!(PriorityLevel::LiveGameState < PriorityLevel::SystemCritical);
        let all: Vec<_> = PriorityLevel::iter().collect();
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }

    #[test]
    fn priority_parses_screaming_snake_case() {
        assert_eq!(
            PriorityLevel::from_str("LIVE_GAME_STATE").unwrap(),
            PriorityLevel::LiveGameState
        );
        assert_eq!(
            PriorityLevel::from_str("background_simulation").unwrap(),
            PriorityLevel::BackgroundSimulation
        );
        assert_eq!(PriorityLevel::SystemCritical.to_string(), "SYSTEM_CRITICAL");
    }

    #[test]
    fn operation_base_costs() {
        assert_eq!(OperationType::BshGeneration.base_cost(), 1.0);
        assert_eq!(OperationType::DmfEvaluation.base_cost(), 5.0);
        assert_eq!(OperationType::AlphaBetaSearch.base_cost(), 2.0);
        assert_eq!(OperationType::OracleTrainingBatch.base_cost(), 500.0);
        assert_eq!(OperationType::iter().count(), 4);
    }

    #[test]
    fn operation_action_type_is_snake_case() {
        assert_eq!(OperationType::DmfEvaluation.action_type(), "dmf_evaluation");
        assert_eq!(
            OperationType::from_str("oracle_training_batch").unwrap(),
            OperationType::OracleTrainingBatch
        );
    }

    #[test]
    fn snapshot_deserializes_from_json() {
        let json = r#"{"cpu_load": 95.0, "gpu_load": 10.0, "cpu_temp": 70.0,
                       "gpu_temp": 88.5, "thermal_status": "warning"}"#;
        let snap: HardwareSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.thermal_status, ThermalStatus::Warning);
        assert_eq!(snap.peak_temp(), 88.5);
        assert!((snap.peak_load_fraction() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn snapshot_thermal_status_defaults_to_nominal() {
        let json = r#"{"cpu_load": 1.0, "gpu_load": 1.0, "cpu_temp": 30.0, "gpu_temp": 30.0}"#;
        let snap: HardwareSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.thermal_status, ThermalStatus::Nominal);
    }

    #[test]
    fn params_depth_defaults_to_one() {
        assert_eq!(OperationParams::default().depth(), 1);
        assert_eq!(OperationParams::with_depth(4).depth(), 4);
    }

    mod prop {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn peak_temp_is_the_max(cpu in -40.0f64..150.0, gpu in -40.0f64..150.0) {
                let snap = HardwareSnapshot {
                    cpu_temp: cpu,
                    gpu_temp: gpu,
                    ..HardwareSnapshot::nominal()
                };
                prop_assert!(snap.peak_temp() >= cpu && snap.peak_temp() >= gpu);
                prop_assert!(snap.peak_temp() == cpu || snap.peak_temp() == gpu);
            }
        }
    }
}
