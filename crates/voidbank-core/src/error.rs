// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Voidbank compute-credit system.
//!
//! Only faults live here. Running out of credits and being denied admission
//! are ordinary outcomes and are returned as typed results by the ledger and
//! policy crates.

use thiserror::Error;

/// The primary error type used across all Voidbank crates.
#[derive(Debug, Error)]
pub enum VoidbankError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, constraint
    /// violation). The in-flight ledger transaction has been rolled back.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A credit or debit amount that is not a finite positive number.
    #[error("invalid amount {amount}: must be finite and greater than zero")]
    InvalidAmount { amount: f64 },

    /// A telemetry provider failed to produce a hardware snapshot.
    #[error("telemetry error: {message}")]
    Telemetry { message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VoidbankError {
    /// Whether this error came from the storage layer.
    pub fn is_storage_fault(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
