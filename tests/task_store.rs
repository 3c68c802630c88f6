use std::sync::Arc;

use tempfile::{tempdir, NamedTempFile};

use taskboard::config::DatabaseConfig;
use taskboard::interfaces::repository::TaskRepository;
use taskboard::providers::sqlite::SqliteTaskStore;
use taskboard::store;

#[tokio::test]
async fn sqlite_store_crud() {
    let db = NamedTempFile::new().unwrap();
    let store = SqliteTaskStore::new(db.path().to_str().unwrap())
        .await
        .unwrap();

    assert!(store.list().await.unwrap().is_empty());

    let milk = store.create("Buy milk").await.unwrap();
    let dog = store.create("Walk dog").await.unwrap();
    assert_eq!(milk.todo, "Buy milk");
    assert!(dog.id > milk.id);

    let updated = store.update(dog.id, "Walk cat").await.unwrap().unwrap();
    assert_eq!(updated.id, dog.id);
    assert_eq!(updated.todo, "Walk cat");
    assert!(store.update(dog.id + 100, "ghost").await.unwrap().is_none());

    let tasks = store.list().await.unwrap();
    assert_eq!(tasks, vec![milk.clone(), updated]);

    assert!(store.delete(dog.id).await.unwrap());
    assert!(!store.delete(dog.id).await.unwrap());
    assert_eq!(store.list().await.unwrap(), vec![milk]);
}

#[tokio::test]
async fn sqlite_store_persists_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tasks.db");
    let path = path.to_str().unwrap().to_string();

    let created = {
        let store = SqliteTaskStore::new(&path).await.unwrap();
        store.create("survive restart").await.unwrap()
    };

    let reopened = SqliteTaskStore::new(&path).await.unwrap();
    assert_eq!(reopened.list().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn open_selects_sqlite_backend() {
    let dir = tempdir().unwrap();
    let config = DatabaseConfig::Sqlite {
        path: dir.path().join("board.db").to_str().unwrap().to_string(),
    };

    let store = store::open(&config).await.unwrap();
    let task = store.create("via trait object").await.unwrap();
    assert_eq!(store.list().await.unwrap(), vec![task]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn sqlite_store_handles_overlapping_reads_and_writes() {
    let db = NamedTempFile::new().unwrap();
    let store = Arc::new(
        SqliteTaskStore::new(db.path().to_str().unwrap())
            .await
            .unwrap(),
    );

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    store.create(&format!("task {i}")).await.map(|_| ())
                } else {
                    store.list().await.map(|_| ())
                }
            })
        })
        .collect();

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(err) = handle.await.unwrap() {
            failures.push(err.to_string());
        }
    }
    assert!(failures.is_empty(), "failed operations: {failures:?}");
    assert_eq!(store.list().await.unwrap().len(), 100);
}
