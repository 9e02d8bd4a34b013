// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command writes human-readable lines to the given writer. Commands
//! that the bank refuses (insufficient funds, admission denial) report
//! [`Outcome::Refused`] rather than an error.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;
use voidbank_banker::VoidBanker;
use voidbank_config::VoidbankConfig;
use voidbank_core::{HardwareSnapshot, OperationParams, OperationType, PriorityLevel, VoidbankError};
use voidbank_cost::DebitOutcome;
use voidbank_policy::{Admission, PurchaseOutcome, ResourcePolicy};

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Credit an agent's account.
    Grant { agent: String, amount: f64 },
    /// Show an agent's balance.
    Balance { agent: String },
    /// Price an operation against the current snapshot without charging.
    Quote {
        op: OperationType,
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Charge an agent for an operation.
    ///
    /// With `--priority` the purchase goes through admission control first.
    Purchase {
        agent: String,
        op: OperationType,
        #[arg(long)]
        depth: Option<u32>,
        #[arg(long)]
        priority: Option<PriorityLevel>,
    },
    /// Run admission control without charging.
    Enforce {
        agent: String,
        priority: PriorityLevel,
        cost: f64,
    },
    /// List an agent's logged debits, oldest first.
    History { agent: String },
    /// Print the integrity report as JSON.
    Status,
}

/// How a successfully executed command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The bank declined the request.
    Refused,
}

fn params(depth: Option<u32>) -> OperationParams {
    OperationParams { depth }
}

fn write_err(e: std::io::Error) -> VoidbankError {
    VoidbankError::Internal(format!("failed to write output: {e}"))
}

/// Read a [`HardwareSnapshot`] from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<HardwareSnapshot, VoidbankError> {
    let content = std::fs::read_to_string(path).map_err(|e| VoidbankError::Telemetry {
        message: format!("cannot read snapshot {}: {e}", path.display()),
    })?;
    serde_json::from_str(&content).map_err(|e| VoidbankError::Telemetry {
        message: format!("invalid snapshot {}: {e}", path.display()),
    })
}

/// Execute one subcommand against an opened banker.
pub async fn run(
    command: Commands,
    banker: &Arc<VoidBanker>,
    config: &VoidbankConfig,
    out: &mut impl Write,
) -> Result<Outcome, VoidbankError> {
    match command {
        Commands::Grant { agent, amount } => {
            banker.grant_credits(&agent, amount).await?;
            let balance = banker.ledger().get_balance(&agent).await?;
            writeln!(out, "granted {amount} CC to {agent} (balance {balance})").map_err(write_err)?;
            Ok(Outcome::Done)
        }
        Commands::Balance { agent } => {
            let balance = banker.ledger().get_balance(&agent).await?;
            writeln!(out, "{balance}").map_err(write_err)?;
            Ok(Outcome::Done)
        }
        Commands::Quote { op, depth } => {
            let cost = banker.quote(op, params(depth));
            writeln!(out, "{cost}").map_err(write_err)?;
            Ok(Outcome::Done)
        }
        Commands::Purchase {
            agent,
            op,
            depth,
            priority: None,
        } => {
            let priced = banker.price(op, params(depth));
            let receipt = banker.execute(&agent, &priced).await?;
            report_debit(out, &agent, op, &receipt.transaction_id, receipt.cost, &receipt.outcome)
        }
        Commands::Purchase {
            agent,
            op,
            depth,
            priority: Some(priority),
        } => {
            let policy = ResourcePolicy::new(Arc::clone(banker), config.policy.clone());
            match policy.purchase(&agent, priority, op, params(depth)).await? {
                PurchaseOutcome::Denied(denial) => {
                    writeln!(out, "denied {denial}").map_err(write_err)?;
                    Ok(Outcome::Refused)
                }
                PurchaseOutcome::Completed(receipt) | PurchaseOutcome::Declined(receipt) => {
                    report_debit(out, &agent, op, &receipt.transaction_id, receipt.cost, &receipt.outcome)
                }
            }
        }
        Commands::Enforce {
            agent,
            priority,
            cost,
        } => {
            let policy = ResourcePolicy::new(Arc::clone(banker), config.policy.clone());
            let stake = policy.calculate_stake(priority);
            match policy.enforce(&agent, priority, cost).await? {
                Admission::Allow => {
                    writeln!(out, "allow (stake {stake})").map_err(write_err)?;
                    Ok(Outcome::Done)
                }
                Admission::Deny(denial) => {
                    writeln!(out, "denied {denial}").map_err(write_err)?;
                    Ok(Outcome::Refused)
                }
            }
        }
        Commands::History { agent } => {
            for txn in banker.ledger().transactions_for(&agent).await? {
                let metadata = serde_json::Value::Object(txn.metadata);
                writeln!(
                    out,
                    "{} {} {} {} {}",
                    txn.timestamp, txn.id, txn.action_type, txn.amount, metadata
                )
                .map_err(write_err)?;
            }
            Ok(Outcome::Done)
        }
        Commands::Status => {
            let report = banker.integrity_report().await?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| VoidbankError::Internal(format!("failed to encode report: {e}")))?;
            writeln!(out, "{json}").map_err(write_err)?;
            if report.is_operational() {
                Ok(Outcome::Done)
            } else {
                Ok(Outcome::Refused)
            }
        }
    }
}

fn report_debit(
    out: &mut impl Write,
    agent: &str,
    op: OperationType,
    transaction_id: &str,
    cost: f64,
    outcome: &DebitOutcome,
) -> Result<Outcome, VoidbankError> {
    match outcome {
        DebitOutcome::Committed { balance } => {
            writeln!(out, "{transaction_id} {op} {cost} CC charged to {agent} (balance {balance})")
                .map_err(write_err)?;
            Ok(Outcome::Done)
        }
        DebitOutcome::InsufficientFunds { balance, requested } => {
            writeln!(out, "insufficient funds: {agent} has {balance} CC, {op} costs {requested}")
                .map_err(write_err)?;
            Ok(Outcome::Refused)
        }
        DebitOutcome::DuplicateTransaction => {
            writeln!(out, "duplicate transaction {transaction_id}").map_err(write_err)?;
            Ok(Outcome::Refused)
        }
    }
}
