// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by collaborators outside the core.

pub mod hardware;
pub mod telemetry;

pub use hardware::HardwareState;
pub use telemetry::TelemetrySource;
