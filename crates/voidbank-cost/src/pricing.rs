// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operation pricing.
//!
//! Base costs (CC): generation 1, evaluation 5, search 2, training batch 500.
//! Search doubles with every level past the first: depth 1, 2, 3, 4 cost
//! 2, 4, 8, 16. A hardware snapshot, when present, multiplies the shaped
//! cost: x100 while critical, x2 while warning, and a further x1.5 once CPU
//! load passes 80%.

use voidbank_config::PricingConfig;
use voidbank_core::{HardwareSnapshot, OperationParams, OperationType, ThermalStatus};

/// Prices operations from their type, parameters, and the hardware state.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: PricingConfig,
}

impl CostModel {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Cost in compute credits.
    ///
    /// Pure: the same inputs always give the same price. An absurd search
    /// depth saturates to `f64::INFINITY`, which the ledger refuses to debit.
    pub fn calculate_cost(
        &self,
        op: OperationType,
        snapshot: Option<&HardwareSnapshot>,
        params: &OperationParams,
    ) -> f64 {
        let shaped = shaped_cost(op, params);
        match snapshot {
            Some(snapshot) => shaped * self.hardware_multiplier(snapshot),
            None => shaped,
        }
    }

    /// Combined thermal and load multiplier for a snapshot.
    pub fn hardware_multiplier(&self, snapshot: &HardwareSnapshot) -> f64 {
        let thermal = match snapshot.thermal_status {
            ThermalStatus::Critical => self.config.critical_multiplier,
            ThermalStatus::Warning => self.config.warning_multiplier,
            ThermalStatus::Nominal => 1.0,
        };
        if snapshot.cpu_load > self.config.cpu_load_threshold {
            thermal * self.config.load_multiplier
        } else {
            thermal
        }
    }
}

/// Base cost with operation-specific shaping, before hardware multipliers.
pub fn shaped_cost(op: OperationType, params: &OperationParams) -> f64 {
    let base = op.base_cost();
    match op {
        OperationType::AlphaBetaSearch => {
            let exponent = i32::try_from(params.depth().saturating_sub(1)).unwrap_or(i32::MAX);
            base * 2f64.powi(exponent)
        }
        OperationType::BshGeneration
        | OperationType::DmfEvaluation
        | OperationType::OracleTrainingBatch => base,
    }
}
