// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase orchestration.
//!
//! A purchase is priced against the current hardware snapshot, turned into
//! a transaction with a unique id, and debited. The banker does no admission
//! control of its own; callers that need gating go through the policy crate,
//! which prices with [`VoidBanker::price`], checks admission, and then calls
//! [`VoidBanker::execute`] with the same price.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info, warn};
use voidbank_config::VoidbankConfig;
use voidbank_core::{
    HardwareSnapshot, HardwareState, HealthStatus, OperationParams, OperationType,
    TelemetrySource, VoidbankError,
};
use voidbank_cost::{AtomicLedger, CostModel, DebitOutcome, Transaction};
use voidbank_storage::Database;

use crate::integrity::IntegrityReport;

/// An operation with its price fixed against one hardware snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOperation {
    pub op: OperationType,
    pub params: OperationParams,
    /// Cost in compute credits.
    pub cost: f64,
}

/// What happened to an executed purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Id of the transaction that was (or would have been) logged.
    pub transaction_id: String,
    pub cost: f64,
    pub outcome: DebitOutcome,
}

impl Receipt {
    pub fn is_committed(&self) -> bool {
        self.outcome.is_committed()
    }
}

/// Owner of the ledger, the cost model, and the current hardware snapshot.
pub struct VoidBanker {
    ledger: AtomicLedger,
    cost_model: CostModel,
    hardware: ArcSwapOption<HardwareSnapshot>,
}

impl VoidBanker {
    /// Assemble a banker with no hardware snapshot installed.
    pub fn new(ledger: AtomicLedger, cost_model: CostModel) -> Self {
        Self {
            ledger,
            cost_model,
            hardware: ArcSwapOption::empty(),
        }
    }

    /// Open the configured database and build the shared banker.
    pub async fn open(config: &VoidbankConfig) -> Result<Arc<Self>, VoidbankError> {
        let db = Database::open_with(&config.storage).await?;
        let ledger = AtomicLedger::new(db, &config.ledger);
        let cost_model = CostModel::new(config.pricing.clone());
        info!(
            path = %config.storage.database_path,
            read_consistency = ?config.ledger.read_consistency,
            "void banker ready"
        );
        Ok(Arc::new(Self::new(ledger, cost_model)))
    }

    pub fn ledger(&self) -> &AtomicLedger {
        &self.ledger
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Replace the hardware snapshot wholesale.
    pub fn update_hardware_state<S: HardwareState + ?Sized>(&self, state: &S) {
        let snapshot = state.snapshot();
        debug!(
            cpu_load = snapshot.cpu_load,
            gpu_load = snapshot.gpu_load,
            cpu_temp = snapshot.cpu_temp,
            gpu_temp = snapshot.gpu_temp,
            thermal_status = %snapshot.thermal_status,
            "hardware snapshot updated"
        );
        self.hardware.store(Some(Arc::new(snapshot)));
    }

    /// Drop the snapshot; pricing and policy then ignore hardware.
    pub fn clear_hardware_state(&self) {
        self.hardware.store(None);
    }

    /// The snapshot currently in force, if any.
    pub fn hardware_state(&self) -> Option<Arc<HardwareSnapshot>> {
        self.hardware.load_full()
    }

    /// Pull one sample from a telemetry provider and install it.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh_from(&self, source: &dyn TelemetrySource) -> Result<(), VoidbankError> {
        match source.sample().await {
            Ok(snapshot) => {
                self.update_hardware_state(&snapshot);
                Ok(())
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "telemetry sample failed");
                Err(e)
            }
        }
    }

    /// Price an operation against the current snapshot.
    pub fn price(&self, op: OperationType, params: OperationParams) -> PricedOperation {
        let snapshot = self.hardware.load();
        let cost = self
            .cost_model
            .calculate_cost(op, snapshot.as_deref(), &params);
        PricedOperation { op, params, cost }
    }

    /// Pricing preview; nothing is charged.
    pub fn quote(&self, op: OperationType, params: OperationParams) -> f64 {
        self.price(op, params).cost
    }

    /// Debit the agent for an already-priced operation.
    pub async fn execute(
        &self,
        agent_id: &str,
        priced: &PricedOperation,
    ) -> Result<Receipt, VoidbankError> {
        let mut metadata = serde_json::Map::new();
        if priced.op == OperationType::AlphaBetaSearch {
            metadata.insert("depth".to_string(), priced.params.depth().into());
        }
        let transaction = Transaction::new(agent_id, priced.op.action_type(), priced.cost, metadata);
        let outcome = self.ledger.debit(&transaction).await?;
        Ok(Receipt {
            transaction_id: transaction.id,
            cost: priced.cost,
            outcome,
        })
    }

    /// Price and debit in one step, without admission control.
    ///
    /// Returns `Ok(false)` when the agent cannot afford the operation.
    pub async fn purchase_operation(
        &self,
        agent_id: &str,
        op: OperationType,
        params: OperationParams,
    ) -> Result<bool, VoidbankError> {
        let priced = self.price(op, params);
        Ok(self.execute(agent_id, &priced).await?.is_committed())
    }

    /// Whether the agent's balance covers `required_cc`. Read-only.
    pub async fn check_solvency(
        &self,
        agent_id: &str,
        required_cc: f64,
    ) -> Result<bool, VoidbankError> {
        Ok(self.ledger.get_balance(agent_id).await? >= required_cc)
    }

    /// Administrative credit grant.
    pub async fn grant_credits(&self, agent_id: &str, amount: f64) -> Result<(), VoidbankError> {
        self.ledger.credit(agent_id, amount).await
    }

    /// Self-check of storage reachability and ledger size.
    pub async fn integrity_report(&self) -> Result<IntegrityReport, VoidbankError> {
        let timestamp = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        let hardware = self.hardware_state().map(|s| (*s).clone());

        let report = match self.ledger.health_check().await {
            HealthStatus::Healthy => IntegrityReport {
                status: "operational",
                timestamp,
                bank_status: "online",
                detail: None,
                accounts: Some(self.ledger.account_count().await?),
                transactions: Some(self.ledger.transaction_count().await?),
                hardware,
            },
            HealthStatus::Degraded(detail) | HealthStatus::Unhealthy(detail) => IntegrityReport {
                status: "degraded",
                timestamp,
                bank_status: "offline",
                detail: Some(detail),
                accounts: None,
                transactions: None,
                hardware,
            },
        };
        Ok(report)
    }
}
