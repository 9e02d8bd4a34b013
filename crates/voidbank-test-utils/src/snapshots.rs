// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hardware snapshots for tests.

use voidbank_core::{HardwareSnapshot, ThermalStatus};

/// Idle machine: 45/40 °C, no load, nominal.
pub fn nominal() -> HardwareSnapshot {
    HardwareSnapshot::nominal()
}

/// Nominal machine with the CPU at `cpu_temp` degrees.
pub fn hot_cpu(cpu_temp: f64) -> HardwareSnapshot {
    HardwareSnapshot {
        cpu_temp,
        ..HardwareSnapshot::nominal()
    }
}

/// Nominal machine with the CPU at `cpu_load` percent.
pub fn cpu_loaded(cpu_load: f64) -> HardwareSnapshot {
    HardwareSnapshot {
        cpu_load,
        ..HardwareSnapshot::nominal()
    }
}

/// Nominal machine with the GPU at `gpu_load` percent.
pub fn gpu_loaded(gpu_load: f64) -> HardwareSnapshot {
    HardwareSnapshot {
        gpu_load,
        ..HardwareSnapshot::nominal()
    }
}

/// Cool, idle machine reporting the given thermal status.
pub fn with_status(thermal_status: ThermalStatus) -> HardwareSnapshot {
    HardwareSnapshot {
        thermal_status,
        ..HardwareSnapshot::nominal()
    }
}
