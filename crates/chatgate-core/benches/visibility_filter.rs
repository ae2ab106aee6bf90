//! Criterion benchmark: inbox filtering and per-conversation decisions.
//! Run with: cargo bench -p chatgate-core --bench visibility_filter

use chatgate_core::{Actor, Conversation, PolicyEngine, Role};
use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use std::hint::black_box;

fn inbox(size: usize) -> Vec<Conversation> {
    (0..size)
        .map(|i| {
            let office = format!("O{}", i % 4);
            Conversation::new(format!("c{i}"), office)
                .with_participants([format!("u{}", i % 50), format!("u{}", (i + 7) % 50)])
        })
        .collect()
}

fn bench_visibility(c: &mut Criterion) {
    let engine = PolicyEngine::builtin();
    let participant = Actor::new("u3", Role::Consultant).with_office("O1");
    let manager = Actor::new("m1", Role::Manager).with_office("O1");
    let admin = Actor::new("root", Role::SuperAdmin);

    let mut group = c.benchmark_group("visibility_filter");
    for size in [100usize, 10_000] {
        let convos = inbox(size);
        for (label, actor) in [
            ("participant", &participant),
            ("scoped_manager", &manager),
            ("super_admin", &admin),
        ] {
            group.bench_function(format!("{label}_{size}"), |b: &mut Bencher<'_>| {
                b.iter(|| black_box(engine.accessible_conversations(&convos, actor).len()));
            });
        }
    }
    group.finish();

    let convo = Conversation::new("c1", "O1").with_participants(["u3", "u9"]);
    c.bench_function("conversation_permissions", |b| {
        b.iter(|| black_box(engine.conversation_permissions(&manager, &convo)));
    });
}

criterion_group!(benches, bench_visibility);
criterion_main!(benches);
