// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for integration testing.
//!
//! `TestBank` assembles a complete banker on a temp SQLite file, so tests
//! exercise the real migrations, PRAGMAs, and single-writer thread.

use std::sync::Arc;

use voidbank_banker::VoidBanker;
use voidbank_config::{
    LedgerConfig, PolicyConfig, PricingConfig, ReadConsistency, StorageConfig, VoidbankConfig,
};
use voidbank_core::{HardwareSnapshot, VoidbankError};

/// Builder for test banks.
pub struct TestBankBuilder {
    read_consistency: ReadConsistency,
    pricing: PricingConfig,
    policy: PolicyConfig,
    snapshot: Option<HardwareSnapshot>,
    grants: Vec<(String, f64)>,
}

impl TestBankBuilder {
    fn new() -> Self {
        Self {
            read_consistency: ReadConsistency::default(),
            pricing: PricingConfig::default(),
            policy: PolicyConfig::default(),
            snapshot: None,
            grants: Vec::new(),
        }
    }

    /// Seed an agent's balance before the test starts.
    pub fn with_balance(mut self, agent_id: &str, amount: f64) -> Self {
        self.grants.push((agent_id.to_string(), amount));
        self
    }

    /// Install a hardware snapshot.
    pub fn with_snapshot(mut self, snapshot: HardwareSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_read_consistency(mut self, read_consistency: ReadConsistency) -> Self {
        self.read_consistency = read_consistency;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Policy thresholds carried in [`TestBank::config`].
    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub async fn build(self) -> Result<TestBank, VoidbankError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| VoidbankError::Storage {
            source: Box::new(e),
        })?;
        let db_path = temp_dir.path().join("test_compute_ledger.db");

        let config = VoidbankConfig {
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().into_owned(),
                wal_mode: true,
            },
            ledger: LedgerConfig {
                read_consistency: self.read_consistency,
            },
            pricing: self.pricing,
            policy: self.policy,
            ..VoidbankConfig::default()
        };

        let banker = VoidBanker::open(&config).await?;
        for (agent_id, amount) in &self.grants {
            banker.grant_credits(agent_id, *amount).await?;
        }
        if let Some(snapshot) = &self.snapshot {
            banker.update_hardware_state(snapshot);
        }

        Ok(TestBank {
            banker,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A banker over a throwaway database.
pub struct TestBank {
    /// The shared banker under test.
    pub banker: Arc<VoidBanker>,
    /// Configuration the bank was built from.
    pub config: VoidbankConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestBank {
    pub fn builder() -> TestBankBuilder {
        TestBankBuilder::new()
    }

    /// Current balance of an agent.
    pub async fn balance(&self, agent_id: &str) -> f64 {
        self.banker
            .ledger()
            .get_balance(agent_id)
            .await
            .expect("balance query on test bank")
    }

    /// Number of logged debits for an agent.
    pub async fn transaction_count(&self, agent_id: &str) -> usize {
        self.banker
            .ledger()
            .transactions_for(agent_id)
            .await
            .expect("transaction query on test bank")
            .len()
    }
}
