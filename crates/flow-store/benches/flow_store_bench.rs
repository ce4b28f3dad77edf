use criterion::{Criterion, criterion_group, criterion_main};
use flow_store::{FieldMap, FlowState, FlowStore, InMemorySessionStore};

fn populated_state() -> FlowState {
    let mut state = FlowState::default();
    state.select_option("Air Freight");
    state.merge_fields(FieldMap::from([
        ("name".into(), "Dana".into()),
        ("email".into(), "dana@example.com".into()),
        ("origin".into(), "Dubai".into()),
        ("destination".into(), "Rotterdam".into()),
    ]));
    state
}

fn bench_save(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("flow_store/save", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemorySessionStore::new();
                store.save(&populated_state()).await.unwrap();
            });
        });
    });
}

fn bench_save_then_load(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("flow_store/save_then_load", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemorySessionStore::new();
                store.save(&populated_state()).await.unwrap();
                let loaded = store.load().await;
                assert!(loaded.has_selection());
            });
        });
    });
}

fn bench_save_with_subscribers(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("flow_store/save_with_4_subscribers", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemorySessionStore::new();
                let _receivers: Vec<_> = (0..4).map(|_| store.subscribe()).collect();
                store.save(&populated_state()).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_save,
    bench_save_then_load,
    bench_save_with_subscribers
);
criterion_main!(benches);
