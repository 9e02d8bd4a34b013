// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Self-check report for the bank.

use serde::Serialize;
use voidbank_core::HardwareSnapshot;

/// Point-in-time health of the bank.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    /// `operational` when storage answers, `degraded` otherwise.
    pub status: &'static str,
    /// ISO 8601 time the report was taken.
    pub timestamp: String,
    /// `online` or `offline`, from the storage probe.
    pub bank_status: &'static str,
    /// Probe failure detail, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Number of accounts; absent when storage is down.
    pub accounts: Option<u64>,
    /// Number of logged debits; absent when storage is down.
    pub transactions: Option<u64>,
    /// Snapshot in force when the report was taken.
    pub hardware: Option<HardwareSnapshot>,
}

impl IntegrityReport {
    pub fn is_operational(&self) -> bool {
        self.status == "operational"
    }
}
