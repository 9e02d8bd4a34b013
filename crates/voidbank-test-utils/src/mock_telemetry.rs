// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock telemetry source for deterministic testing.
//!
//! Snapshots are popped from a FIFO queue. Once the queue is drained the
//! last snapshot handed out is repeated; an empty mock reports the sensor
//! as offline.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use voidbank_core::{HardwareSnapshot, TelemetrySource, VoidbankError};

#[derive(Default)]
struct Readings {
    queued: VecDeque<HardwareSnapshot>,
    last: Option<HardwareSnapshot>,
}

/// A telemetry source that replays scripted snapshots.
#[derive(Default)]
pub struct MockTelemetry {
    readings: Mutex<Readings>,
}

impl MockTelemetry {
    /// A source with nothing to report; every sample fails.
    pub fn offline() -> Self {
        Self::default()
    }

    /// A source that always reports `snapshot`.
    pub fn steady(snapshot: HardwareSnapshot) -> Self {
        Self::with_readings(vec![snapshot])
    }

    /// A source that reports `snapshots` in order, then repeats the last one.
    pub fn with_readings(snapshots: Vec<HardwareSnapshot>) -> Self {
        Self {
            readings: Mutex::new(Readings {
                queued: snapshots.into(),
                last: None,
            }),
        }
    }

    /// Queue another snapshot.
    pub async fn push(&self, snapshot: HardwareSnapshot) {
        self.readings.lock().await.queued.push_back(snapshot);
    }
}

#[async_trait]
impl TelemetrySource for MockTelemetry {
    fn name(&self) -> &str {
        "mock"
    }

    async fn sample(&self) -> Result<HardwareSnapshot, VoidbankError> {
        let mut readings = self.readings.lock().await;
        if let Some(next) = readings.queued.pop_front() {
            readings.last = Some(next);
        }
        readings.last.clone().ok_or_else(|| VoidbankError::Telemetry {
            message: "mock sensor offline".to_string(),
        })
    }
}
