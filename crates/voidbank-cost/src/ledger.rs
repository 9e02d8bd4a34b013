// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atomic compute-credit ledger backed by SQLite.
//!
//! Balances live in `accounts`, every successful debit appends one row to
//! `transactions`. Credits and debits are serialized by a single ledger-wide
//! lock that is held for the whole read-compare-update-append sequence, and
//! each mutation is one SQLite transaction: it commits completely or not at
//! all. The balance can therefore never go negative, even when many agents
//! race for the same credits.

use rusqlite::{OptionalExtension, TransactionBehavior, params};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use voidbank_config::{LedgerConfig, ReadConsistency};
use voidbank_core::{HealthStatus, VoidbankError};
use voidbank_storage::{Database, map_tr_err};

/// A per-agent balance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub agent_id: String,
    /// Current balance in compute credits; never negative.
    pub balance: f64,
    /// ISO 8601 timestamp of the last credit or debit.
    pub last_updated: String,
}

/// One debit in the append-only log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique record identifier.
    pub id: String,
    pub agent_id: String,
    /// What was bought, e.g. `dmf_evaluation`.
    pub action_type: String,
    /// Cost in compute credits; must be positive.
    pub amount: f64,
    /// ISO 8601 timestamp.
    pub timestamp: String,
    /// Free-form details, stored as JSON text.
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Transaction {
    /// Build a transaction with a fresh UUID v4 id and the current time.
    pub fn new(
        agent_id: impl Into<String>,
        action_type: impl Into<String>,
        amount: f64,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: format!("txn_{}", uuid::Uuid::new_v4()),
            agent_id: agent_id.into(),
            action_type: action_type.into(),
            amount,
            timestamp: now_timestamp(),
            metadata,
        }
    }
}

/// Result of a debit attempt that reached the database.
#[derive(Debug, Clone, PartialEq)]
pub enum DebitOutcome {
    /// Balance reduced and the transaction logged.
    Committed { balance: f64 },
    /// Balance too low; nothing was written.
    InsufficientFunds { balance: f64, requested: f64 },
    /// A transaction with this id is already logged; nothing was written.
    DuplicateTransaction,
}

impl DebitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

fn validate_amount(amount: f64) -> Result<(), VoidbankError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(VoidbankError::InvalidAmount { amount })
    }
}

/// The compute-credit ledger.
///
/// One instance per database. Share it behind an `Arc`; cloning the
/// underlying [`Database`] into a second ledger would create a second lock
/// and break mutation ordering.
///
/// Amounts are `f64` and stored as SQLite `REAL`, so fractional amounts are
/// subject to binary rounding: crediting 0.3 and debiting 0.1 leaves
/// 0.19999999999999998, which cannot cover a debit of 0.2. The solvency
/// comparison is exact; whole-credit amounts are unaffected.
pub struct AtomicLedger {
    db: Database,
    write_lock: Mutex<()>,
    read_consistency: ReadConsistency,
}

impl AtomicLedger {
    /// Create a ledger on an opened, migrated database.
    pub fn new(db: Database, config: &LedgerConfig) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
            read_consistency: config.read_consistency,
        }
    }

    /// Open a ledger from a database file path with default settings.
    pub async fn open(path: &str) -> Result<Self, VoidbankError> {
        let db = Database::open(path).await?;
        Ok(Self::new(db, &LedgerConfig::default()))
    }

    pub fn read_consistency(&self) -> ReadConsistency {
        self.read_consistency
    }

    /// Acquire the read guard demanded by the configured consistency.
    async fn read_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match self.read_consistency {
            ReadConsistency::Snapshot => None,
            ReadConsistency::Serializable => Some(self.write_lock.lock().await),
        }
    }

    /// Current balance, or 0.0 for an agent that has never been credited.
    ///
    /// Always a committed value: each mutation runs as one closure on the
    /// database thread, so a read can never land between its statements.
    pub async fn get_balance(&self, agent_id: &str) -> Result<f64, VoidbankError> {
        let agent_id = agent_id.to_string();
        let _guard = self.read_guard().await;
        self.db
            .connection()
            .call(move |conn| {
                let balance: Option<f64> = conn
                    .query_row(
                        "SELECT balance FROM accounts WHERE agent_id = ?1",
                        params![agent_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(balance.unwrap_or(0.0))
            })
            .await
            .map_err(map_tr_err)
    }

    /// The account row, if the agent has ever been credited.
    pub async fn account(&self, agent_id: &str) -> Result<Option<Account>, VoidbankError> {
        let agent_id = agent_id.to_string();
        let _guard = self.read_guard().await;
        self.db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT agent_id, balance, last_updated FROM accounts WHERE agent_id = ?1",
                    params![agent_id],
                    |row| {
                        Ok(Account {
                            agent_id: row.get(0)?,
                            balance: row.get(1)?,
                            last_updated: row.get(2)?,
                        })
                    },
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    /// Add credits, creating the account on first use.
    pub async fn credit(&self, agent_id: &str, amount: f64) -> Result<(), VoidbankError> {
        validate_amount(amount)?;
        let agent = agent_id.to_string();
        let now = now_timestamp();

        let _guard = self.write_lock.lock().await;
        let balance = self
            .db
            .connection()
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                tx.execute(
                    "INSERT INTO accounts (agent_id, balance, last_updated) VALUES (?1, ?2, ?3)
                     ON CONFLICT(agent_id) DO UPDATE SET
                         balance = balance + excluded.balance,
                         last_updated = excluded.last_updated",
                    params![agent, amount, now],
                )?;
                let balance: f64 = tx.query_row(
                    "SELECT balance FROM accounts WHERE agent_id = ?1",
                    params![agent],
                    |row| row.get(0),
                )?;
                tx.commit()?;
                Ok(balance)
            })
            .await
            .map_err(map_tr_err)?;

        info!(agent_id, amount, balance, "credits granted");
        Ok(())
    }

    /// Apply a debit and log it, or change nothing.
    ///
    /// Insufficient balance and an already-logged transaction id are
    /// reported through [`DebitOutcome`]. `Err` means a storage fault, in
    /// which case the SQLite transaction was rolled back.
    pub async fn debit(&self, transaction: &Transaction) -> Result<DebitOutcome, VoidbankError> {
        validate_amount(transaction.amount)?;
        let metadata = serde_json::to_string(&transaction.metadata)
            .map_err(|e| VoidbankError::Internal(format!("unserializable metadata: {e}")))?;
        let record = transaction.clone();
        let now = now_timestamp();

        let _guard = self.write_lock.lock().await;
        let outcome = self
            .db
            .connection()
            .call(move |conn| {
                // Dropping `tx` without commit rolls back.
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let balance: f64 = tx
                    .query_row(
                        "SELECT balance FROM accounts WHERE agent_id = ?1",
                        params![record.agent_id],
                        |row| row.get(0),
                    )
                    .optional()?
                    .unwrap_or(0.0);

                if balance < record.amount {
                    return Ok(DebitOutcome::InsufficientFunds {
                        balance,
                        requested: record.amount,
                    });
                }

                let duplicate: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM transactions WHERE id = ?1)",
                    params![record.id],
                    |row| row.get(0),
                )?;
                if duplicate {
                    return Ok(DebitOutcome::DuplicateTransaction);
                }

                let remaining = balance - record.amount;
                tx.execute(
                    "UPDATE accounts SET balance = ?1, last_updated = ?2 WHERE agent_id = ?3",
                    params![remaining, now, record.agent_id],
                )?;
                tx.execute(
                    "INSERT INTO transactions (id, agent_id, action_type, amount, timestamp, metadata)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        record.id,
                        record.agent_id,
                        record.action_type,
                        record.amount,
                        record.timestamp,
                        metadata,
                    ],
                )?;
                tx.commit()?;
                Ok(DebitOutcome::Committed { balance: remaining })
            })
            .await
            .map_err(map_tr_err)?;

        match &outcome {
            DebitOutcome::Committed { balance } => info!(
                agent_id = %transaction.agent_id,
                action_type = %transaction.action_type,
                amount = transaction.amount,
                balance,
                "debit committed"
            ),
            DebitOutcome::InsufficientFunds { balance, requested } => warn!(
                agent_id = %transaction.agent_id,
                balance,
                requested,
                "debit rejected: insufficient funds"
            ),
            DebitOutcome::DuplicateTransaction => warn!(
                transaction_id = %transaction.id,
                "debit rejected: duplicate transaction id"
            ),
        }
        Ok(outcome)
    }

    /// Logged debits for one agent, oldest first.
    pub async fn transactions_for(&self, agent_id: &str) -> Result<Vec<Transaction>, VoidbankError> {
        let agent_id = agent_id.to_string();
        let _guard = self.read_guard().await;
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, agent_id, action_type, amount, timestamp, metadata
                     FROM transactions WHERE agent_id = ?1 ORDER BY timestamp, rowid",
                )?;
                let rows = stmt.query_map(params![agent_id], |row| {
                    let metadata: String = row.get(5)?;
                    let metadata = serde_json::from_str(&metadata).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            5,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    Ok(Transaction {
                        id: row.get(0)?,
                        agent_id: row.get(1)?,
                        action_type: row.get(2)?,
                        amount: row.get(3)?,
                        timestamp: row.get(4)?,
                        metadata,
                    })
                })?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(map_tr_err)
    }

    /// Number of logged debits across all agents.
    pub async fn transaction_count(&self) -> Result<u64, VoidbankError> {
        self.count("SELECT COUNT(*) FROM transactions").await
    }

    /// Number of accounts ever credited.
    pub async fn account_count(&self) -> Result<u64, VoidbankError> {
        self.count("SELECT COUNT(*) FROM accounts").await
    }

    async fn count(&self, sql: &'static str) -> Result<u64, VoidbankError> {
        let _guard = self.read_guard().await;
        let count: i64 = self
            .db
            .connection()
            .call(move |conn| conn.query_row(sql, [], |row| row.get(0)))
            .await
            .map_err(map_tr_err)?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Storage probe used by the integrity report.
    pub async fn health_check(&self) -> HealthStatus {
        let status = self.db.health_check().await;
        debug!(?status, "ledger health probed");
        status
    }
}
