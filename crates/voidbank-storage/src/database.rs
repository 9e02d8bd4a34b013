// SPDX-FileCopyrightText: 2026 Voidbank Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! A [`Database`] wraps exactly one `tokio_rusqlite::Connection`. Every query
//! closure is executed in submission order on that connection's background
//! thread. Do NOT open additional connections for writes.

use std::time::Duration;

use tracing::debug;
use voidbank_config::StorageConfig;
use voidbank_core::{HealthStatus, VoidbankError};

use crate::migrations;

/// Convert a tokio-rusqlite error into `VoidbankError::Storage`.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> VoidbankError {
    VoidbankError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the ledger database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database file at `path` in WAL mode and apply migrations.
    pub async fn open(path: &str) -> Result<Self, VoidbankError> {
        Self::open_with(&StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        })
        .await
    }

    /// Open the database described by a storage config section.
    pub async fn open_with(config: &StorageConfig) -> Result<Self, VoidbankError> {
        let path = std::path::Path::new(&config.database_path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| VoidbankError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(&config.database_path)
            .await
            .map_err(|e| VoidbankError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(config.wal_mode).await?;
        debug!(path = %config.database_path, wal = config.wal_mode, "ledger database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the full schema applied.
    pub async fn open_in_memory() -> Result<Self, VoidbankError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| VoidbankError::Storage {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.prepare(false).await?;
        Ok(db)
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    async fn prepare(&self, wal_mode: bool) -> Result<(), VoidbankError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    let _mode: String =
                        conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
                    conn.pragma_update(None, "synchronous", "NORMAL")?;
                }
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.busy_timeout(Duration::from_secs(5))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        // Migration failures are already VoidbankErrors; only the transport
        // error goes through map_tr_err.
        self.conn
            .call(|conn| -> Result<Result<(), VoidbankError>, rusqlite::Error> {
                Ok(migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?
    }

    /// Probe the connection with a trivial query.
    pub async fn health_check(&self) -> HealthStatus {
        let probe = self
            .conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT 1", [], |row| row.get(0))
            })
            .await;
        match probe {
            Ok(1) => HealthStatus::Healthy,
            Ok(other) => HealthStatus::Degraded(format!("probe returned {other}")),
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), VoidbankError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(|e| VoidbankError::Storage {
            source: Box::new(e),
        })?;
        debug!("ledger database closed");
        Ok(())
    }
}
