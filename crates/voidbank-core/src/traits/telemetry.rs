// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telemetry source trait for hardware snapshot providers.

use async_trait::async_trait;

use crate::error::VoidbankError;
use crate::types::HardwareSnapshot;

/// A provider of hardware snapshots (sensor daemon, agent process, mock).
///
/// Acquisition itself lives outside the core. The banker only pulls a
/// sample on request and installs it as the current snapshot.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Human-readable name of the provider, used in logs.
    fn name(&self) -> &str;

    /// Take one sample of the hardware state.
    async fn sample(&self) -> Result<HardwareSnapshot, VoidbankError>;
}
