// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Voidbank integration tests.
//!
//! # Components
//!
//! - [`TestBank`] - a banker over a throwaway database, with optional
//!   seeded balances and hardware snapshot
//! - [`MockTelemetry`] - a telemetry source returning scripted snapshots
//! - [`snapshots`] - ready-made hardware snapshots for common scenarios

pub mod harness;
pub mod mock_telemetry;
pub mod snapshots;

pub use harness::{TestBank, TestBankBuilder};
pub use mock_telemetry::MockTelemetry;
