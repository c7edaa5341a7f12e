// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use larissa::connector::ConnectorSet;
use larissa::layout::{correct_offset, rearrange, recompute_childwidths, LayoutConfig};
use larissa::model::{Block, BlockId, Point, Size};
use larissa::store::BlockStore;

/// Balanced tree with `fanout` children per block down to `depth` rows.
fn tree(fanout: u32, depth: u32) -> BlockStore {
    let mut store = BlockStore::new();
    store.add(Block::new(
        BlockId::new(0),
        None,
        Point::new(600.0, 50.0),
        Size::new(100.0, 40.0),
    ));

    let mut row = vec![0u32];
    let mut next = 1u32;
    for level in 1..=depth {
        let mut new_row = Vec::new();
        for parent in &row {
            for _ in 0..fanout {
                store.add(Block::new(
                    BlockId::new(next),
                    Some(BlockId::new(*parent)),
                    Point::new(600.0, 50.0 + 120.0 * f64::from(level)),
                    Size::new(100.0, 40.0),
                ));
                new_row.push(next);
                next += 1;
            }
        }
        row = new_row;
    }
    store
}

fn bench_rearrange(c: &mut Criterion) {
    let config = LayoutConfig::default();
    for (fanout, depth) in [(3u32, 3u32), (4, 4), (2, 8)] {
        let store = tree(fanout, depth);
        let label = format!("rearrange/fanout{fanout}_depth{depth}_{}blocks", store.len());
        c.bench_function(&label, |b| {
            b.iter_batched(
                || (store.clone(), ConnectorSet::new()),
                |(mut store, mut connectors)| {
                    rearrange(black_box(&mut store), &mut connectors, &config);
                    correct_offset(&mut store, &mut connectors, &config);
                    black_box(store.len())
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_recompute_childwidths(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let store = tree(4, 4);
    c.bench_function("recompute_childwidths/fanout4_depth4", |b| {
        b.iter_batched(
            || store.clone(),
            |mut store| {
                recompute_childwidths(black_box(&mut store), &config);
                black_box(store.len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_rearrange, bench_recompute_childwidths);
criterion_main!(benches);
