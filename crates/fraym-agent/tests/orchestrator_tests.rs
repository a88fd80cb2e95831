// SPDX-FileCopyrightText: 2026 Fraym Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full-pipeline tests: scripted assistant runs against a real temp SQLite
//! cart store.

use std::sync::Arc;

use fraym_agent::{CartReconciler, Orchestrator};
use fraym_config::model::{PollConfig, StorageConfig};
use fraym_core::{CartItemDesired, CartStore, FraymError, RunId, RunStatus, ThreadId};
use fraym_storage::SqliteStorage;
use fraym_test_utils::{init_tracing, MockAssistant};

async fn temp_store() -> (Arc<SqliteStorage>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let storage = SqliteStorage::new(StorageConfig {
        database_path: db_path.to_string_lossy().to_string(),
        wal_mode: true,
    });
    storage.initialize().await.unwrap();
    (Arc::new(storage), dir)
}

fn fast_poll() -> PollConfig {
    PollConfig {
        interval_ms: 1,
        max_attempts: 10,
    }
}

fn ids() -> (ThreadId, RunId) {
    (ThreadId("thread_1".into()), RunId("run_1".into()))
}

fn desired(product_id: &str, quantity: u32) -> CartItemDesired {
    CartItemDesired {
        product_id: product_id.into(),
        product_name: format!("Product {product_id}"),
        quantity,
        unit_price: 2.0,
        total_price: 2.0 * quantity as f64,
    }
}

#[tokio::test]
async fn fenced_payload_with_cart_is_reconciled_and_rewritten() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let mock = Arc::new(MockAssistant::with_statuses(vec![
        RunStatus::Queued,
        RunStatus::InProgress,
        RunStatus::Completed,
    ]));
    mock.set_latest_message(
        "assistant",
        concat!(
            "```json\n",
            "{\"answer\": \"Added apples to your cart.\",\n",
            " \"suggestion\": \"Bananas go well with those\",\n",
            " \"desiredState\": {\"cart\": [\n",
            "   {\"productId\": \"p1\", \"productName\": \"Apples\", \"quantity\": 2,\n",
            "    \"unitPrice\": 1.5, \"totalPrice\": 3.0}\n",
            " ]}}\n",
            "```"
        ),
    )
    .await;

    let orchestrator = Orchestrator::new(mock.clone(), store.clone(), fast_poll());
    let (thread, run) = ids();
    let reply = orchestrator.run_to_reply(&thread, &run, "owner-1").await.unwrap();

    assert_eq!(reply.suggestion.as_deref(), Some("Bananas go well with those"));

    let value: serde_json::Value = serde_json::from_str(&reply.text).unwrap();
    assert_eq!(value["answer"], "Added apples to your cart.");
    assert_eq!(value["cart_updated"], true);
    // The cart fragment and suggestion are stripped from the outward payload.
    assert!(value["desiredState"].get("cart").is_none());
    assert!(value.get("suggestion").is_none());

    let items = store.list_for_owner("owner-1").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "p1");
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn same_snapshot_twice_reports_no_update_the_second_time() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let payload = "{\"answer\": \"ok\", \"desiredState\": {\"cart\": [\
                   {\"productId\": \"p1\", \"productName\": \"Apples\", \"quantity\": 2,\
                   \"unitPrice\": 1.5, \"totalPrice\": 3.0}]}}";

    for (pass, expected_flag) in [(1, true), (2, false)] {
        let mock = Arc::new(MockAssistant::new());
        mock.set_latest_message("assistant", payload).await;
        let orchestrator = Orchestrator::new(mock, store.clone(), fast_poll());
        let (thread, run) = ids();

        let reply = orchestrator.run_to_reply(&thread, &run, "owner-1").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply.text).unwrap();
        assert_eq!(value["cart_updated"], expected_flag, "pass {pass}");
    }

    let items = store.list_for_owner("owner-1").await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn unrecoverable_output_falls_back_to_raw_text() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let mock = Arc::new(MockAssistant::new());
    mock.set_latest_message("assistant", "Sorry, I don't have that in stock {")
        .await;

    let orchestrator = Orchestrator::new(mock, store.clone(), fast_poll());
    let (thread, run) = ids();
    let reply = orchestrator.run_to_reply(&thread, &run, "owner-1").await.unwrap();

    assert_eq!(reply.text, "Sorry, I don't have that in stock {");
    assert!(reply.suggestion.is_none());
    // No reconciliation was attempted.
    assert!(store.list_for_owner("owner-1").await.unwrap().is_empty());
}

#[tokio::test]
async fn near_valid_payload_is_repaired_before_reconciliation() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let mock = Arc::new(MockAssistant::new());
    // Single quotes and a trailing comma: parseable only after repair.
    mock.set_latest_message(
        "assistant",
        "```json\n{\"answer\": 'done', \"desiredState\": {\"cart\": [\
         {\"productId\": 'p9', \"quantity\": 1,}]}}\n```",
    )
    .await;

    let orchestrator = Orchestrator::new(mock, store.clone(), fast_poll());
    let (thread, run) = ids();
    let reply = orchestrator.run_to_reply(&thread, &run, "owner-9").await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&reply.text).unwrap();
    assert_eq!(value["cart_updated"], true);
    let items = store.list_for_owner("owner-9").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "p9");
}

#[tokio::test]
async fn timeout_surfaces_to_the_caller() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let mock = Arc::new(MockAssistant::with_statuses(vec![RunStatus::InProgress]));

    let orchestrator = Orchestrator::new(mock, store, fast_poll());
    let (thread, run) = ids();
    let err = orchestrator.run_to_reply(&thread, &run, "owner-1").await.unwrap_err();
    assert!(matches!(err, FraymError::RunTimeout { .. }));
}

#[tokio::test]
async fn reconciler_applies_update_create_and_delete_against_real_store() {
    init_tracing();
    let (store, _dir) = temp_store().await;
    let reconciler = CartReconciler::new(store.clone());

    // Initial snapshot: p1 qty 2.
    assert!(reconciler.reconcile("owner-1", &[desired("p1", 2)]).await);

    // p1 changes, p2 appears.
    assert!(
        reconciler
            .reconcile("owner-1", &[desired("p1", 3), desired("p2", 1)])
            .await
    );
    let items = store.list_for_owner("owner-1").await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().find(|i| i.product_id == "p1").unwrap().quantity, 3);

    // p2 disappears.
    assert!(reconciler.reconcile("owner-1", &[desired("p1", 3)]).await);
    let items = store.list_for_owner("owner-1").await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "p1");

    // Same snapshot again: nothing to do.
    assert!(!reconciler.reconcile("owner-1", &[desired("p1", 3)]).await);

    // Another owner's cart is untouched throughout.
    assert!(store.list_for_owner("owner-2").await.unwrap().is_empty());
}
