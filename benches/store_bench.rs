use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::NamedTempFile;

use taskboard::interfaces::repository::TaskRepository;
use taskboard::providers::sqlite::SqliteTaskStore;

fn bench_store_list(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let db = NamedTempFile::new().unwrap();
    let store = rt.block_on(async {
        let store = SqliteTaskStore::new(db.path().to_str().unwrap())
            .await
            .unwrap();
        for i in 0..200 {
            store.create(&format!("task {i}")).await.unwrap();
        }
        store
    });

    let mut group = c.benchmark_group("task_store");
    group.sample_size(20);

    group.bench_function("list_200", |b| {
        b.iter(|| {
            let tasks = rt.block_on(store.list()).unwrap();
            assert_eq!(tasks.len(), 200);
        })
    });

    group.bench_function("create_then_delete", |b| {
        b.iter(|| {
            rt.block_on(async {
                let task = store.create("transient").await.unwrap();
                store.delete(task.id).await.unwrap();
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_store_list);
criterion_main!(benches);
