// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The resource policy engine.

use std::sync::Arc;

use tracing::{debug, warn};
use voidbank_banker::VoidBanker;
use voidbank_config::PolicyConfig;
use voidbank_core::{OperationParams, OperationType, PriorityLevel, VoidbankError};

use crate::admission::{Admission, Denial, DenialReason, PurchaseOutcome};

/// Gates operations on hardware state, priority, and solvency.
///
/// Reads the banker's snapshot and balances; never writes to the ledger
/// except through [`ResourcePolicy::purchase`] after an `Allow`.
pub struct ResourcePolicy {
    banker: Arc<VoidBanker>,
    config: PolicyConfig,
}

impl ResourcePolicy {
    pub fn new(banker: Arc<VoidBanker>, config: PolicyConfig) -> Self {
        Self { banker, config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Decide whether `agent_id` may run an operation of `estimated_cost`.
    ///
    /// `Err` only for storage faults during the solvency read.
    pub async fn enforce(
        &self,
        agent_id: &str,
        priority: PriorityLevel,
        estimated_cost: f64,
    ) -> Result<Admission, VoidbankError> {
        if let Some(hw) = self.banker.hardware_state() {
            let temp = hw.peak_temp();
            if temp > self.config.thermal_limit_celsius {
                return Ok(self.deny(
                    agent_id,
                    priority,
                    DenialReason::ThermalGuard,
                    format!(
                        "system temperature {temp}°C exceeds limit of {}°C",
                        self.config.thermal_limit_celsius
                    ),
                ));
            }

            let load = hw.peak_load_fraction();
            if load > self.config.load_shedding_threshold
                && priority < PriorityLevel::LiveGameState
            {
                return Ok(self.deny(
                    agent_id,
                    priority,
                    DenialReason::LoadShedding,
                    format!(
                        "priority {priority} insufficient for current load {:.1}%",
                        load * 100.0
                    ),
                ));
            }
        }

        let required = estimated_cost + self.config.min_solvency_buffer;
        if !self.banker.check_solvency(agent_id, required).await? {
            return Ok(self.deny(
                agent_id,
                priority,
                DenialReason::Insolvency,
                format!("agent {agent_id} lacks sufficient compute credits (needs {required})"),
            ));
        }

        debug!(agent_id, %priority, estimated_cost, "operation admitted");
        Ok(Admission::Allow)
    }

    fn deny(
        &self,
        agent_id: &str,
        priority: PriorityLevel,
        reason: DenialReason,
        message: String,
    ) -> Admission {
        warn!(agent_id, %priority, %reason, "{message}");
        Admission::Deny(Denial { reason, message })
    }

    /// Advisory stake for high-priority admission; not checked by [`enforce`](Self::enforce).
    pub fn calculate_stake(&self, priority: PriorityLevel) -> f64 {
        if priority >= PriorityLevel::LiveGameState {
            self.config.high_priority_stake
        } else {
            0.0
        }
    }

    /// Price, admit, and debit an operation.
    ///
    /// The price is fixed once against the snapshot current at entry, and
    /// that same amount is both checked and debited.
    pub async fn purchase(
        &self,
        agent_id: &str,
        priority: PriorityLevel,
        op: OperationType,
        params: OperationParams,
    ) -> Result<PurchaseOutcome, VoidbankError> {
        let priced = self.banker.price(op, params);
        match self.enforce(agent_id, priority, priced.cost).await? {
            Admission::Deny(denial) => Ok(PurchaseOutcome::Denied(denial)),
            Admission::Allow => {
                let receipt = self.banker.execute(agent_id, &priced).await?;
                if receipt.is_committed() {
                    Ok(PurchaseOutcome::Completed(receipt))
                } else {
                    Ok(PurchaseOutcome::Declined(receipt))
                }
            }
        }
    }
}
