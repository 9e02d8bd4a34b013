// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hardware state capability.

use crate::types::{HardwareSnapshot, ThermalStatus};

/// Read access to a point-in-time view of the shared compute hardware.
///
/// Any telemetry type can implement this; the banker copies it into an owned
/// [`HardwareSnapshot`] on update so later changes to the source are never
/// observed half-applied.
pub trait HardwareState {
    /// CPU utilisation as a percentage (0-100).
    fn cpu_load(&self) -> f64;

    /// GPU utilisation as a percentage (0-100).
    fn gpu_load(&self) -> f64;

    /// CPU package temperature in degrees Celsius.
    fn cpu_temp(&self) -> f64;

    /// GPU core temperature in degrees Celsius.
    fn gpu_temp(&self) -> f64;

    /// Coarse thermal classification reported by the platform.
    fn thermal_status(&self) -> ThermalStatus;

    /// Copy the current readings into an owned snapshot.
    fn snapshot(&self) -> HardwareSnapshot {
        HardwareSnapshot {
            cpu_load: self.cpu_load(),
            gpu_load: self.gpu_load(),
            cpu_temp: self.cpu_temp(),
            gpu_temp: self.gpu_temp(),
            thermal_status: self.thermal_status(),
        }
    }
}

impl HardwareState for HardwareSnapshot {
    fn cpu_load(&self) -> f64 {
        self.cpu_load
    }

    fn gpu_load(&self) -> f64 {
        self.gpu_load
    }

    fn cpu_temp(&self) -> f64 {
        self.cpu_temp
    }

    fn gpu_temp(&self) -> f64 {
        self.gpu_temp
    }

    fn thermal_status(&self) -> ThermalStatus {
        self.thermal_status
    }

    fn snapshot(&self) -> HardwareSnapshot {
        self.clone()
    }
}
