// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{correct_offset, propagate_upward, rearrange, recompute_childwidths, LayoutConfig, LEFT_MARGIN};
use crate::connector::ConnectorSet;
use crate::model::{Block, BlockId, Point, Size};
use crate::store::BlockStore;

fn block(id: u32, parent: Option<u32>, x: f64, y: f64, width: f64) -> Block {
    Block::new(
        BlockId::new(id),
        parent.map(BlockId::new),
        Point::new(x, y),
        Size::new(width, 40.0),
    )
}

fn three_block_tree() -> (BlockStore, ConnectorSet, LayoutConfig) {
    let mut store = BlockStore::new();
    store.add(block(0, None, 300.0, 100.0, 100.0));
    store.add(block(1, Some(0), 0.0, 220.0, 100.0));
    store.add(block(2, Some(0), 0.0, 220.0, 100.0));
    (store, ConnectorSet::new(), LayoutConfig::default())
}

#[test]
fn siblings_spread_around_the_parent_center() {
    let (mut store, mut connectors, config) = three_block_tree();

    rearrange(&mut store, &mut connectors, &config);

    // total = 100 + 20 + 100 = 220; children center at parent.x ± 60
    assert_eq!(store.get(BlockId::new(0)).unwrap().childwidth, 220.0);
    assert_eq!(store.get(BlockId::new(1)).unwrap().x, 240.0);
    assert_eq!(store.get(BlockId::new(2)).unwrap().x, 360.0);
}

#[test]
fn rearrange_is_idempotent() {
    let (mut store, mut connectors, config) = three_block_tree();
    store.add(block(3, Some(1), 0.0, 340.0, 100.0));
    store.add(block(4, Some(1), 0.0, 340.0, 100.0));
    recompute_childwidths(&mut store, &config);

    rearrange(&mut store, &mut connectors, &config);
    let first_pass: Vec<(f64, f64)> = store.iter().map(|b| (b.x, b.childwidth)).collect();

    rearrange(&mut store, &mut connectors, &config);
    let second_pass: Vec<(f64, f64)> = store.iter().map(|b| (b.x, b.childwidth)).collect();

    assert_eq!(first_pass, second_pass);
}

#[test]
fn wider_subtrees_reserve_their_subtree_width() {
    let (mut store, mut connectors, config) = three_block_tree();
    // block 1 grows a wide subtree of its own
    store.add(block(3, Some(1), 0.0, 340.0, 150.0));
    store.add(block(4, Some(1), 0.0, 340.0, 150.0));
    propagate_upward(&mut store, BlockId::new(3), &config);

    rearrange(&mut store, &mut connectors, &config);

    let b1 = *store.get(BlockId::new(1)).unwrap();
    let b2 = *store.get(BlockId::new(2)).unwrap();
    // block 1's slot is its childwidth (150+20+150=320), not its 100px box
    assert_eq!(b1.childwidth, 320.0);
    assert_eq!(store.get(BlockId::new(0)).unwrap().childwidth, 320.0 + 20.0 + 100.0);
    // the sibling sits clear of the whole subtree
    assert!(b2.x - b2.width / 2.0 >= b1.x + b1.childwidth / 2.0);
}

#[test]
fn leaf_childwidths_are_reset_by_the_pass() {
    let (mut store, mut connectors, config) = three_block_tree();
    store.get_mut(BlockId::new(2)).unwrap().childwidth = 480.0; // stale cache

    rearrange(&mut store, &mut connectors, &config);

    assert_eq!(store.get(BlockId::new(2)).unwrap().childwidth, 0.0);
    assert_eq!(store.get(BlockId::new(0)).unwrap().childwidth, 220.0);
}

#[test]
fn rearrange_updates_connectors_of_repositioned_children() {
    let (mut store, mut connectors, config) = three_block_tree();

    rearrange(&mut store, &mut connectors, &config);

    let left = connectors.get(BlockId::new(1)).expect("connector for 1");
    let right = connectors.get(BlockId::new(2)).expect("connector for 2");
    assert_eq!(left.source(), BlockId::new(0));
    // child 1 landed left of the parent stem, child 2 right of it
    assert_eq!(left.path().end_x, 5.0);
    assert_eq!(right.path().end_x, 360.0 - 300.0 + 20.0);
}

#[test]
fn offset_correction_shifts_everything_right_of_the_origin() {
    let (mut store, mut connectors, config) = three_block_tree();
    store.get_mut(BlockId::new(0)).unwrap().x = 60.0;
    rearrange(&mut store, &mut connectors, &config);
    // leftmost child now at x=0, left edge -50
    let before: Vec<f64> = store.iter().map(|b| b.x).collect();

    let shift = correct_offset(&mut store, &mut connectors, &config);

    assert_eq!(shift, LEFT_MARGIN + 50.0);
    let after: Vec<f64> = store.iter().map(|b| b.x).collect();
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(new - old, shift);
    }
    let min_left = store.iter().map(|b| b.left()).fold(f64::INFINITY, f64::min);
    assert_eq!(min_left, LEFT_MARGIN);
}

#[test]
fn offset_correction_is_a_no_op_when_inside_the_canvas() {
    let (mut store, mut connectors, config) = three_block_tree();
    rearrange(&mut store, &mut connectors, &config);

    assert_eq!(correct_offset(&mut store, &mut connectors, &config), 0.0);
}

#[test]
fn propagate_upward_walks_the_whole_ancestor_chain() {
    let mut store = BlockStore::new();
    store.add(block(0, None, 300.0, 100.0, 100.0));
    store.add(block(1, Some(0), 300.0, 220.0, 100.0));
    store.add(block(2, Some(1), 300.0, 340.0, 120.0));
    let config = LayoutConfig::default();

    propagate_upward(&mut store, BlockId::new(1), &config);

    assert_eq!(store.get(BlockId::new(1)).unwrap().childwidth, 120.0);
    // block 1's slot is max(100, 120) = 120
    assert_eq!(store.get(BlockId::new(0)).unwrap().childwidth, 120.0);
}

#[test]
fn recompute_childwidths_settles_deep_trees_bottom_up() {
    let mut store = BlockStore::new();
    store.add(block(0, None, 300.0, 100.0, 100.0));
    store.add(block(1, Some(0), 300.0, 220.0, 100.0));
    store.add(block(2, Some(1), 240.0, 340.0, 100.0));
    store.add(block(3, Some(1), 360.0, 340.0, 100.0));
    let config = LayoutConfig::default();

    recompute_childwidths(&mut store, &config);

    assert_eq!(store.get(BlockId::new(2)).unwrap().childwidth, 0.0);
    assert_eq!(store.get(BlockId::new(3)).unwrap().childwidth, 0.0);
    assert_eq!(store.get(BlockId::new(1)).unwrap().childwidth, 220.0);
    // parent reads the settled 220 slot, not block 1's 100px box
    assert_eq!(store.get(BlockId::new(0)).unwrap().childwidth, 220.0);
}

#[test]
fn childwidth_formula_holds_for_every_non_leaf_after_a_pass() {
    let (mut store, mut connectors, config) = three_block_tree();
    store.add(block(3, Some(1), 0.0, 340.0, 80.0));
    store.add(block(4, Some(1), 0.0, 340.0, 60.0));
    store.add(block(5, Some(2), 0.0, 340.0, 200.0));
    recompute_childwidths(&mut store, &config);
    rearrange(&mut store, &mut connectors, &config);

    for b in store.blocks().to_vec() {
        let children = store.children_of(Some(b.id));
        if children.is_empty() {
            continue;
        }
        let expected: f64 = children
            .iter()
            .map(|id| store.get(*id).unwrap().effective_width())
            .sum::<f64>()
            + config.spacing_x * (children.len() as f64 - 1.0);
        assert_eq!(store.get(b.id).unwrap().childwidth, expected, "block {}", b.id);
    }
}
