use std::num::NonZeroUsize;
use std::sync::Arc;

use tempfile::tempdir;

use recents_common::DEFAULT_SLOT_KEY;
use recents_core::{ManualClock, NewProductView, RecentlyViewed, StoreConfig};
use recents_storage::{FileStorage, SlotStorage, SyncPolicy};

fn product(id: &str, price: f64) -> NewProductView {
    NewProductView::new(id, format!("Product {id}"), format!("https://cdn.test/{id}.jpg"), price)
}

fn ids(store_items: &[recents_core::ProductView]) -> Vec<String> {
    store_items.iter().map(|i| i.id.clone()).collect()
}

#[tokio::test]
async fn test_list_survives_reopen() {
    let dir = tempdir().unwrap();

    {
        let store = RecentlyViewed::new(FileStorage::new(dir.path(), SyncPolicy::Always));
        store
            .record(product("a", 10.0).with_rating(4.5))
            .await
            .unwrap();
        store
            .record(product("b", 20.0).with_discount(15.0))
            .await
            .unwrap();
    }

    let store = RecentlyViewed::new(FileStorage::new(dir.path(), SyncPolicy::Always));
    let items = store.list(None).await;
    assert_eq!(ids(&items), vec!["b", "a"]);
    assert_eq!(items[0].discount, Some(15.0));
    assert_eq!(items[1].rating, Some(4.5));
}

#[tokio::test]
async fn test_record_remove_clear_on_disk() {
    let dir = tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let store =
        RecentlyViewed::new(FileStorage::new(dir.path(), SyncPolicy::No)).with_clock(clock.clone());

    for id in ["A", "B", "C"] {
        store.record(product(id, 1.0)).await.unwrap();
        clock.advance(1_000);
    }
    assert_eq!(ids(&store.list(None).await), vec!["C", "B", "A"]);

    store.record(product("A", 1.0)).await.unwrap();
    let items = store.list(None).await;
    assert_eq!(ids(&items), vec!["A", "C", "B"]);
    assert_eq!(items[0].viewed_at, 1_700_000_003_000);

    store.remove("C").await.unwrap();
    assert_eq!(ids(&store.list(None).await), vec!["A", "B"]);

    store.clear().await.unwrap();
    assert!(store.list(None).await.is_empty());
    assert!(!dir.path().join(DEFAULT_SLOT_KEY).exists());
}

#[tokio::test]
async fn test_slot_layout_is_json_array() {
    let dir = tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(42));
    let storage = FileStorage::new(dir.path(), SyncPolicy::No);
    let store = RecentlyViewed::new(storage.clone()).with_clock(clock);

    store.record(product("p1", 499.0)).await.unwrap();

    let raw = storage.read_slot(DEFAULT_SLOT_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": "p1",
            "name": "Product p1",
            "image": "https://cdn.test/p1.jpg",
            "price": 499.0,
            "viewedAt": 42
        }])
    );
}

#[tokio::test]
async fn test_reads_legacy_slot_file() {
    let dir = tempdir().unwrap();
    let legacy = r#"[{"_id":"old","name":"Old","image":"i","price":5,"rating":3,"viewedAt":1}]"#;
    std::fs::write(dir.path().join(DEFAULT_SLOT_KEY), legacy).unwrap();

    let store = RecentlyViewed::new(FileStorage::new(dir.path(), SyncPolicy::No));
    store.record(product("new", 1.0)).await.unwrap();

    let items = store.list(None).await;
    assert_eq!(ids(&items), vec!["new", "old"]);
    assert_eq!(items[1].rating, Some(3.0));
}

#[tokio::test]
async fn test_capacity_and_limit_with_custom_slot() {
    let dir = tempdir().unwrap();
    let config = StoreConfig::default()
        .with_slot_key("recents-v2")
        .with_capacity(5);
    let store = RecentlyViewed::with_config(FileStorage::new(dir.path(), SyncPolicy::No), config);

    for i in 0..8 {
        store.record(product(&format!("p{i}"), 1.0)).await.unwrap();
    }

    assert_eq!(store.list(None).await.len(), 5);
    assert_eq!(
        ids(&store.list(NonZeroUsize::new(3)).await),
        vec!["p7", "p6", "p5"]
    );
    assert!(dir.path().join("recents-v2").exists());
}

#[tokio::test]
async fn test_unwritable_directory_degrades() {
    let dir = tempdir().unwrap();
    // Um arquivo comum no lugar do diretório de dados
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, b"x").unwrap();

    let store = RecentlyViewed::new(FileStorage::new(&blocker, SyncPolicy::No));
    let err = store.record(product("a", 1.0)).await.unwrap_err();
    assert!(err.is_storage_fault());
    assert!(store.list(None).await.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_records_keep_slot_readable() {
    let dir = tempdir().unwrap();
    let store = Arc::new(RecentlyViewed::new(FileStorage::new(dir.path(), SyncPolicy::No)));

    for round in 0..30 {
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.record(product(&format!("r{round}-p{i}"), 1.0)).await
            }));
        }
        for h in handles {
            // Last-write-wins pode perder registros, mas nenhuma escrita falha
            h.await.unwrap().unwrap();
        }

        let items = store.load(None).await.unwrap();
        assert!(!items.is_empty());
        assert!(items.len() <= 20);
    }
}
