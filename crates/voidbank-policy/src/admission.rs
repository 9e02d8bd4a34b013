// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission decisions and their reason codes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use voidbank_banker::Receipt;

/// Which gate denied an operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DenialReason {
    ThermalGuard,
    LoadShedding,
    Insolvency,
}

/// A categorized denial. `reason` is the contract; `message` is for humans.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{reason}: {message}")]
pub struct Denial {
    pub reason: DenialReason,
    pub message: String,
}

/// Outcome of one admission check.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Allow,
    Deny(Denial),
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial),
        }
    }

    pub fn reason(&self) -> Option<DenialReason> {
        self.denial().map(|d| d.reason)
    }
}

/// Outcome of a policy-gated purchase.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Admitted and debited.
    Completed(Receipt),
    /// Refused at admission; the ledger was not touched.
    Denied(Denial),
    /// Admitted, but the debit did not commit (the balance moved between the
    /// solvency check and the debit, or the id collided).
    Declined(Receipt),
}

impl PurchaseOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Self::Denied(denial) => Some(denial.reason),
            Self::Completed(_) | Self::Declined(_) => None,
        }
    }
}
