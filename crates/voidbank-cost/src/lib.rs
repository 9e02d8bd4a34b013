// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compute-credit accounting and pricing for Voidbank.
//!
//! This crate provides:
//! - **Atomic ledger**: per-agent balances and an append-only transaction log
//!   in SQLite, with every mutation serialized behind one ledger-wide lock
//! - **Cost model**: deterministic operation pricing with thermal and load
//!   multipliers taken from a hardware snapshot

pub mod ledger;
pub mod pricing;

pub use ledger::{Account, AtomicLedger, DebitOutcome, Transaction};
pub use pricing::CostModel;
