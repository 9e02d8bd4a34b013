// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Voidbank compute-credit system.
//!
//! This crate provides the error type, the domain types shared by the ledger,
//! pricing, and admission crates, and the capability traits that telemetry
//! providers implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VoidbankError;
pub use traits::{HardwareState, TelemetrySource};
pub use types::{
    HardwareSnapshot, HealthStatus, OperationParams, OperationType, PriorityLevel, ThermalStatus,
};
