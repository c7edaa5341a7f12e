// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use larissa::drag::{collect_subtree, hit_test};
use larissa::engine::DiagramEngine;
use larissa::host::fixtures::StaticHost;
use larissa::model::{BlockId, Point, Size, TemplateId};

const TASK: &str = "task";

/// Chain of `extra` template drops under a root, all through the engine so
/// the store carries realistic layout state.
fn engine_with_chain(extra: u32) -> DiagramEngine<StaticHost> {
    let host = StaticHost::new().with_template(TASK, Size::new(100.0, 40.0));
    let mut engine = DiagramEngine::new(host);

    engine
        .grab_template(TemplateId::new(TASK), Point::new(300.0, 100.0), Point::new(50.0, 20.0))
        .expect("grab root");
    engine.release(Point::new(300.0, 100.0)).expect("drop root");

    for n in 0..extra {
        let tail = engine.store().get(BlockId::new(n)).expect("tail block");
        let at = Point::new(tail.x + 10.0, tail.y + tail.height + 10.0);
        engine
            .grab_template(TemplateId::new(TASK), at, Point::new(50.0, 20.0))
            .expect("grab");
        engine.release(at).expect("drop");
    }
    engine
}

fn bench_hit_test(c: &mut Criterion) {
    let engine = engine_with_chain(63);
    let store = engine.store();
    c.bench_function("hit_test/64blocks_miss", |b| {
        b.iter(|| black_box(hit_test(store, black_box(5000.0), black_box(5000.0), 20.0)))
    });
    c.bench_function("hit_test/64blocks_tail_hit", |b| {
        let tail = store.get(BlockId::new(63)).expect("tail");
        b.iter(|| black_box(hit_test(store, black_box(tail.x), black_box(tail.y), 20.0)))
    });
}

fn bench_collect_subtree(c: &mut Criterion) {
    let engine = engine_with_chain(63);
    c.bench_function("collect_subtree/64block_chain", |b| {
        b.iter(|| black_box(collect_subtree(engine.store(), BlockId::new(0)).len()))
    });
}

fn bench_drop_cycle(c: &mut Criterion) {
    c.bench_function("drop_cycle/grab_move_release_on_32blocks", |b| {
        b.iter_batched(
            || engine_with_chain(31),
            |mut engine| {
                let at = Point::new(310.0, 150.0);
                engine
                    .grab_template(TemplateId::new(TASK), Point::new(600.0, 300.0), Point::new(50.0, 20.0))
                    .expect("grab");
                engine.pointer_move(at);
                let outcome = engine.release(at).expect("release");
                black_box(outcome)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_hit_test, bench_collect_subtree, bench_drop_cycle);
criterion_main!(benches);
