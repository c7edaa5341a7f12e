// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{collect_subtree, edge_scroll, hit_test, EDGE_STEP};
use crate::model::{Block, BlockId, Point, Rect, Size};
use crate::store::BlockStore;

fn block(id: u32, parent: Option<u32>, x: f64, y: f64) -> Block {
    Block::new(
        BlockId::new(id),
        parent.map(BlockId::new),
        Point::new(x, y),
        Size::new(100.0, 40.0),
    )
}

fn single_block_store() -> BlockStore {
    let mut store = BlockStore::new();
    // block at (200, 100), 100x40 → zone x ∈ [130, 270], y ∈ [80, 140]
    store.add(block(0, None, 200.0, 100.0));
    store
}

#[rstest]
// inside on both axes
#[case(200.0, 100.0, true)]
// horizontal zone extends spacing_x past the half-width on either side
#[case(130.0, 100.0, true)]
#[case(270.0, 100.0, true)]
#[case(129.9, 100.0, false)]
#[case(270.1, 100.0, false)]
// vertical zone runs from top edge down a full height below the center
#[case(200.0, 80.0, true)]
#[case(200.0, 140.0, true)]
#[case(200.0, 79.9, false)]
#[case(200.0, 140.1, false)]
fn hit_test_matches_the_attach_zone(
    #[case] center_x: f64,
    #[case] top_y: f64,
    #[case] expected: bool,
) {
    let store = single_block_store();
    let hit = hit_test(&store, center_x, top_y, 20.0);
    assert_eq!(hit.is_some(), expected, "({center_x}, {top_y})");
}

#[test]
fn hit_test_takes_the_first_match_in_store_order() {
    let mut store = BlockStore::new();
    // two overlapping zones; the earlier insertion wins, no closest-match
    store.add(block(0, None, 200.0, 100.0));
    store.add(block(1, Some(0), 230.0, 100.0));

    assert_eq!(hit_test(&store, 225.0, 100.0, 20.0), Some(BlockId::new(0)));
}

#[test]
fn collect_subtree_walks_breadth_first() {
    let mut store = BlockStore::new();
    store.add(block(0, None, 0.0, 0.0));
    store.add(block(1, Some(0), 0.0, 0.0));
    store.add(block(2, Some(0), 0.0, 0.0));
    store.add(block(3, Some(1), 0.0, 0.0));
    store.add(block(4, Some(2), 0.0, 0.0));
    store.add(block(5, Some(3), 0.0, 0.0));

    let order: Vec<u32> = collect_subtree(&store, BlockId::new(0))
        .into_iter()
        .map(BlockId::get)
        .collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);

    let order: Vec<u32> = collect_subtree(&store, BlockId::new(1))
        .into_iter()
        .map(BlockId::get)
        .collect();
    assert_eq!(order, vec![1, 3, 5]);
}

#[rstest]
#[case(Point::new(795.0, 300.0), Some((EDGE_STEP, 0.0)))] // right band
#[case(Point::new(5.0, 300.0), Some((-EDGE_STEP, 0.0)))] // left band
#[case(Point::new(400.0, 595.0), Some((0.0, EDGE_STEP)))] // bottom band
#[case(Point::new(400.0, 5.0), Some((0.0, -EDGE_STEP)))] // top band
#[case(Point::new(400.0, 300.0), None)] // interior
#[case(Point::new(780.0, 300.0), None)] // just inside the band threshold
fn edge_scroll_covers_all_four_sides(
    #[case] pointer: Point,
    #[case] expected: Option<(f64, f64)>,
) {
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
    assert_eq!(edge_scroll(pointer, viewport), expected);
}
