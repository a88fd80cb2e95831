// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the CartStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use fraym_config::model::StorageConfig;
use fraym_core::types::{CartItem, CartItemDesired};
use fraym_core::{AdapterType, CartStore, FraymError, HealthStatus, PluginAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed cart store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`SqliteStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Opens the database, applying migrations.
    pub async fn initialize(&self) -> Result<(), FraymError> {
        let db = Database::open_with_wal(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FraymError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Checkpoints the WAL before the handle is dropped.
    pub async fn close(&self) -> Result<(), FraymError> {
        self.db()?.close().await
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FraymError> {
        self.db.get().ok_or_else(|| FraymError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FraymError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FraymError> {
        if self.db.get().is_some() {
            self.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl CartStore for SqliteStorage {
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<CartItem>, FraymError> {
        queries::cart::list_for_owner(self.db()?, owner_id).await
    }

    async fn delete_by_ids(&self, ids: &[i64]) -> Result<(), FraymError> {
        queries::cart::delete_items(self.db()?, ids).await
    }

    async fn create(&self, owner_id: &str, item: &CartItemDesired) -> Result<(), FraymError> {
        queries::cart::create_item(self.db()?, owner_id, item).await
    }

    async fn update(&self, id: i64, item: &CartItemDesired) -> Result<(), FraymError> {
        queries::cart::update_item(self.db()?, id, item).await
    }
}
