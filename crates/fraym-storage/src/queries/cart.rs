// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cart item CRUD operations.

use fraym_core::FraymError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{CartItem, CartItemDesired};

/// List all cart items belonging to one owner.
pub async fn list_for_owner(db: &Database, owner_id: &str) -> Result<Vec<CartItem>, FraymError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, product_id, product_name, quantity, unit_price,
                        total_price, created_at, updated_at
                 FROM cart_items WHERE owner_id = ?1 ORDER BY created_at, id",
            )?;
            let rows = stmt.query_map(params![owner_id], |row| {
                Ok(CartItem {
                    id: row.get(0)?,
                    owner_id: row.get(1)?,
                    product_id: row.get(2)?,
                    product_name: row.get(3)?,
                    quantity: row.get(4)?,
                    unit_price: row.get(5)?,
                    total_price: row.get(6)?,
                    created_at: row.get(7)?,
                    updated_at: row.get(8)?,
                })
            })?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(items)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a new cart item for an owner from a desired descriptor.
pub async fn create_item(
    db: &Database,
    owner_id: &str,
    item: &CartItemDesired,
) -> Result<(), FraymError> {
    let owner_id = owner_id.to_string();
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO cart_items
                     (owner_id, product_id, product_name, quantity, unit_price, total_price,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6,
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
                         strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![
                    owner_id,
                    item.product_id,
                    item.product_name,
                    item.quantity,
                    item.unit_price,
                    item.total_price,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite all payload-visible fields of an existing cart item.
pub async fn update_item(db: &Database, id: i64, item: &CartItemDesired) -> Result<(), FraymError> {
    let item = item.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE cart_items
                 SET product_name = ?1, quantity = ?2, unit_price = ?3, total_price = ?4,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?5",
                params![
                    item.product_name,
                    item.quantity,
                    item.unit_price,
                    item.total_price,
                    id,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a set of cart items by storage id in one batched statement.
///
/// A no-op for an empty id set.
pub async fn delete_items(db: &Database, ids: &[i64]) -> Result<(), FraymError> {
    if ids.is_empty() {
        return Ok(());
    }
    let ids = ids.to_vec();
    db.connection()
        .call(move |conn| {
            // rusqlite has no array binding; expand one placeholder per id.
            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!("DELETE FROM cart_items WHERE id IN ({placeholders})");
            conn.execute(&sql, rusqlite::params_from_iter(ids.iter()))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn desired(product_id: &str, quantity: u32) -> CartItemDesired {
        CartItemDesired {
            product_id: product_id.to_string(),
            product_name: format!("Product {product_id}"),
            quantity,
            unit_price: 2.5,
            total_price: 2.5 * quantity as f64,
        }
    }

    #[tokio::test]
    async fn create_and_list_roundtrips() {
        let (db, _dir) = setup_db().await;

        create_item(&db, "owner-1", &desired("p1", 2)).await.unwrap();
        create_item(&db, "owner-1", &desired("p2", 1)).await.unwrap();
        create_item(&db, "owner-2", &desired("p1", 5)).await.unwrap();

        let items = list_for_owner(&db, "owner-1").await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, "p1");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].owner_id, "owner-1");
        assert!(!items[0].created_at.is_empty());

        // Another owner's rows are invisible.
        let other = list_for_owner(&db, "owner-2").await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].quantity, 5);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_product_for_one_owner_is_rejected() {
        let (db, _dir) = setup_db().await;

        create_item(&db, "owner-1", &desired("p1", 1)).await.unwrap();
        let result = create_item(&db, "owner-1", &desired("p1", 3)).await;
        assert!(result.is_err(), "UNIQUE(owner_id, product_id) should reject");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let (db, _dir) = setup_db().await;

        create_item(&db, "owner-1", &desired("p1", 2)).await.unwrap();
        let id = list_for_owner(&db, "owner-1").await.unwrap()[0].id;

        let mut changed = desired("p1", 4);
        changed.product_name = "Renamed".to_string();
        update_item(&db, id, &changed).await.unwrap();

        let items = list_for_owner(&db, "owner-1").await.unwrap();
        assert_eq!(items[0].quantity, 4);
        assert_eq!(items[0].product_name, "Renamed");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn batched_delete_removes_only_given_ids() {
        let (db, _dir) = setup_db().await;

        create_item(&db, "owner-1", &desired("p1", 1)).await.unwrap();
        create_item(&db, "owner-1", &desired("p2", 1)).await.unwrap();
        create_item(&db, "owner-1", &desired("p3", 1)).await.unwrap();
        let items = list_for_owner(&db, "owner-1").await.unwrap();
        let ids: Vec<i64> = items.iter().take(2).map(|i| i.id).collect();

        delete_items(&db, &ids).await.unwrap();

        let remaining = list_for_owner(&db, "owner-1").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product_id, "p3");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_with_empty_set_is_noop() {
        let (db, _dir) = setup_db().await;
        create_item(&db, "owner-1", &desired("p1", 1)).await.unwrap();

        delete_items(&db, &[]).await.unwrap();

        assert_eq!(list_for_owner(&db, "owner-1").await.unwrap().len(), 1);
        db.close().await.unwrap();
    }
}
