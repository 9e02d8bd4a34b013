// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Voidbank manager.
//!
//! [`VoidBanker`] owns the ledger, the cost model, and the latest hardware
//! snapshot. Construct it once per process and hand `Arc<VoidBanker>` to
//! every consumer.

pub mod banker;
pub mod integrity;

pub use banker::{PricedOperation, Receipt, VoidBanker};
pub use integrity::IntegrityReport;
