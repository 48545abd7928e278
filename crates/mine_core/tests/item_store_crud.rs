use mine_core::db::migrations::{current_user_version, latest_version};
use mine_core::{DataStore, DatabaseConfig, DbHandle, Item, SqliteItemStore};
use std::collections::HashMap;

fn in_memory_store() -> SqliteItemStore {
    SqliteItemStore::new(DbHandle::open_in_memory().unwrap())
}

#[tokio::test]
async fn milk_lifecycle_example() {
    let store = in_memory_store();

    let item = Item::with_id("1", "Milk", "2%");
    assert!(store.create(&item).await.unwrap());
    assert_eq!(store.read("1").await.unwrap(), Some(item));

    let whole = Item::with_id("1", "Milk", "Whole");
    assert!(store.update(&whole).await.unwrap());
    let loaded = store.read("1").await.unwrap().unwrap();
    assert_eq!(loaded.description, "Whole");

    assert!(store.delete("1").await.unwrap());
    assert_eq!(store.read("1").await.unwrap(), None);
    assert!(store.list(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_blank_id_fails_without_writing() {
    let store = in_memory_store();

    assert!(!store.create(&Item::with_id("", "Milk", "2%")).await.unwrap());
    assert!(!store.create(&Item::with_id("   ", "Milk", "2%")).await.unwrap());
    assert!(store.list(true).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_then_read_preserves_every_field() {
    let store = in_memory_store();
    let item = Item::new("Eggs", "free range").with_value(12);

    assert!(store.create(&item).await.unwrap());

    let loaded = store.read(&item.id).await.unwrap().unwrap();
    assert_eq!(loaded, item);
    assert_eq!(loaded.value, 12);
}

#[tokio::test]
async fn read_with_blank_or_unknown_id_returns_none() {
    let store = in_memory_store();
    store.create(&Item::with_id("1", "Milk", "2%")).await.unwrap();

    assert_eq!(store.read("").await.unwrap(), None);
    assert_eq!(store.read("2").await.unwrap(), None);
}

#[tokio::test]
async fn update_unknown_id_fails_and_leaves_storage_unchanged() {
    let store = in_memory_store();
    let existing = Item::with_id("1", "Milk", "2%");
    store.create(&existing).await.unwrap();

    assert!(!store.update(&Item::with_id("2", "Bread", "rye")).await.unwrap());
    assert!(!store.update(&Item::with_id("", "Bread", "rye")).await.unwrap());

    assert_eq!(store.list(true).await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn delete_unknown_id_fails_and_leaves_storage_unchanged() {
    let store = in_memory_store();
    let existing = Item::with_id("1", "Milk", "2%");
    store.create(&existing).await.unwrap();

    assert!(!store.delete("2").await.unwrap());
    assert!(!store.delete(" ").await.unwrap());

    assert_eq!(store.list(true).await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn list_returns_exactly_what_was_created() {
    for count in [0usize, 1, 5] {
        let store = in_memory_store();
        let mut created = HashMap::new();
        for index in 0..count {
            let item = Item::new(format!("item {index}"), format!("description {index}"))
                .with_value(index as i64);
            assert!(store.create(&item).await.unwrap());
            created.insert(item.id.clone(), item);
        }

        let listed = store.list(true).await.unwrap();
        assert_eq!(listed.len(), count);
        for item in listed {
            assert_eq!(created.get(&item.id), Some(&item));
        }
    }
}

#[tokio::test]
async fn force_refresh_flag_does_not_change_results() {
    let store = in_memory_store();
    store.create(&Item::with_id("1", "Milk", "2%")).await.unwrap();

    assert_eq!(store.list(true).await.unwrap(), store.list(false).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stores_on_one_handle_initialize_schema_once() {
    let dir = tempfile::tempdir().unwrap();
    let handle = DbHandle::open(&DatabaseConfig::new(dir.path().join("items.sqlite3"))).unwrap();

    let tasks = (0..8)
        .map(|index| {
            let store = SqliteItemStore::new(handle.clone());
            tokio::spawn(async move {
                store
                    .create(&Item::with_id(index.to_string(), "item", "concurrent"))
                    .await
                    .unwrap()
            })
        })
        .collect::<Vec<_>>();
    for task in tasks {
        assert!(task.await.unwrap());
    }

    assert!(handle.is_schema_ready());
    let conn = handle.connection().await.unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 8);
}

#[tokio::test]
async fn items_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("items.sqlite3"));
    let item = Item::with_id("1", "Milk", "2%");

    {
        let store = SqliteItemStore::new(DbHandle::open(&config).unwrap());
        assert!(store.create(&item).await.unwrap());
    }

    let reopened = SqliteItemStore::new(DbHandle::open(&config).unwrap());
    assert_eq!(reopened.read("1").await.unwrap(), Some(item));
}
