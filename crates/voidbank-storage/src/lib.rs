// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Voidbank ledger.
//!
//! Provides a WAL-mode SQLite handle with embedded migrations for the
//! `accounts` and `transactions` tables. All statements run on the single
//! background thread owned by `tokio-rusqlite`, so blocking I/O never
//! occupies an async worker.

pub mod database;
pub mod migrations;

pub use database::{Database, map_tr_err};
