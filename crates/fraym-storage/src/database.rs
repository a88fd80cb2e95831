// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::time::Duration;

use fraym_core::FraymError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Handle to the SQLite database behind a tokio-rusqlite worker thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path`, applies PRAGMAs and runs
    /// all pending migrations.
    pub async fn open(path: &str) -> Result<Self, FraymError> {
        Self::open_with_wal(path, true).await
    }

    /// Opens the database with explicit control over WAL journal mode.
    pub async fn open_with_wal(path: &str, wal_mode: bool) -> Result<Self, FraymError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| FraymError::Storage {
                source: Box::new(e),
            })?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| -> Result<(), FraymError> {
            crate::migrations::run_migrations(conn)
        })
        .await
        .map_err(|e| FraymError::Storage {
            source: e.to_string().into(),
        })?;

        debug!(path, wal_mode, "database opened and migrated");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL, flushing pending pages into the main file.
    pub async fn close(&self) -> Result<(), FraymError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Bridge a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> FraymError {
    FraymError::Storage {
        source: Box::new(e),
    }
}
