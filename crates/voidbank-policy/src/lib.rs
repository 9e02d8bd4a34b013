// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admission control for Voidbank.
//!
//! [`ResourcePolicy`] decides whether an operation may run before any credit
//! is spent. Gates are checked in a fixed order and the first failing gate
//! decides the outcome:
//!
//! 1. **Thermal guard**: hottest of CPU/GPU above the limit denies everything.
//! 2. **Load shedding**: busiest of CPU/GPU above the threshold denies
//!    priorities below `LIVE_GAME_STATE`.
//! 3. **Solvency**: balance below estimated cost plus buffer denies.
//!
//! A denial is final for that request; nothing is queued or retried.

pub mod admission;
pub mod policy;

pub use admission::{Admission, Denial, DenialReason, PurchaseOutcome};
pub use policy::ResourcePolicy;
