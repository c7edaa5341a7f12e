// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sibling positioning and subtree-width bookkeeping.
//!
//! [`rearrange`] is a full pass run after any structural change. It groups
//! blocks by parent, recomputes each group's total width, stores that total
//! as the parent's `childwidth`, and spreads the children around the
//! parent's center. Wider subtrees reserve their subtree width, not their
//! visual width, so nephews never overlap.
//!
//! [`correct_offset`] then shifts the whole diagram right if any block would
//! render past the canvas's left edge.

use tracing::trace;

use crate::connector::ConnectorSet;
use crate::model::BlockId;
use crate::store::BlockStore;

/// Horizontal gap between siblings and vertical gap between generations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub spacing_x: f64,
    pub spacing_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { spacing_x: 20.0, spacing_y: 80.0 }
    }
}

/// Margin kept between the canvas's left edge and the leftmost block after
/// an offset correction.
pub const LEFT_MARGIN: f64 = 20.0;

/// Total width of a sibling group: `Σ max(width, childwidth) + spacing_x·(n−1)`.
fn group_width(store: &BlockStore, children: &[BlockId], spacing_x: f64) -> f64 {
    let mut total = 0.0;
    for (index, id) in children.iter().enumerate() {
        let child = store.get(*id).expect("child ids come from the store");
        total += child.effective_width();
        if index + 1 < children.len() {
            total += spacing_x;
        }
    }
    total
}

/// Full rearrange pass.
///
/// Groups are visited in first-appearance store order, which puts ancestor
/// rows before descendant rows (children are only ever inserted after their
/// parent), so every child reads its parent's final `x`. Repositioned
/// children get their connector updated in place.
pub fn rearrange(store: &mut BlockStore, connectors: &mut ConnectorSet, config: &LayoutConfig) {
    let mut groups: Vec<Option<BlockId>> = Vec::new();
    for block in store.iter() {
        if !groups.contains(&block.parent) {
            groups.push(block.parent);
        }
    }
    trace!(groups = groups.len(), blocks = store.len(), "rearrange pass");

    for parent in groups {
        let children = store.children_of(parent);

        // children without children of their own drop any stale cached width
        for id in &children {
            if store.child_count(*id) == 0 {
                store.get_mut(*id).expect("child ids come from the store").childwidth = 0.0;
            }
        }

        let total = group_width(store, &children, config.spacing_x);

        // the root row owns no parent record: widths reset above, nothing to
        // assign or reposition
        let Some(parent_id) = parent else {
            continue;
        };
        let parent_x = {
            let parent_block = store
                .get_mut(parent_id)
                .expect("group parents are referenced by their children");
            parent_block.childwidth = total;
            parent_block.x
        };

        let mut offset = 0.0;
        for id in &children {
            let child = store.get_mut(*id).expect("child ids come from the store");
            let effective = child.effective_width();
            child.x = parent_x - total / 2.0 + offset + effective / 2.0;
            offset += effective + config.spacing_x;
        }

        for id in &children {
            let parent_block = store.get(parent_id).expect("parent exists");
            let child = store.get(*id).expect("child exists");
            connectors.update(parent_block, child, config.spacing_y);
        }
    }
}

/// Uniformly shifts the diagram right when any block's left edge falls past
/// the canvas's content origin, then updates every connector. Returns the
/// applied shift, `0.0` when nothing moved.
pub fn correct_offset(
    store: &mut BlockStore,
    connectors: &mut ConnectorSet,
    config: &LayoutConfig,
) -> f64 {
    let Some(min_left) = store.iter().map(|b| b.left()).min_by(f64::total_cmp) else {
        return 0.0;
    };
    if min_left >= 0.0 {
        return 0.0;
    }

    let shift = LEFT_MARGIN - min_left;
    trace!(shift, "offset correction");
    for block in store.iter_mut() {
        block.x += shift;
    }

    let child_parent_pairs: Vec<(BlockId, BlockId)> = store
        .iter()
        .filter_map(|b| b.parent.map(|p| (b.id, p)))
        .collect();
    for (child_id, parent_id) in child_parent_pairs {
        let parent = store.get(parent_id).expect("parent exists");
        let child = store.get(child_id).expect("child exists");
        connectors.update(parent, child, config.spacing_y);
    }

    shift
}

/// Recomputes `childwidth` for `from` and every ancestor above it, stopping
/// after the root row's child (the root sentinel owns no record).
pub fn propagate_upward(store: &mut BlockStore, from: BlockId, config: &LayoutConfig) {
    let mut current = Some(from);
    let mut steps = 0usize;
    while let Some(id) = current {
        // parent chains terminate within store-size steps; anything longer
        // is a structural-invariant violation upstream of this call
        debug_assert!(steps <= store.len(), "cycle in parent chain at block {id}");
        let children = store.children_of(Some(id));
        let total = if children.is_empty() {
            0.0
        } else {
            group_width(store, &children, config.spacing_x)
        };
        let block = store.get_mut(id).expect("ancestor chain stays in the store");
        block.childwidth = total;
        current = block.parent;
        steps += 1;
    }
}

/// Fresh bottom-up recompute of every cached `childwidth`.
///
/// Used after a subtree detach, where the surviving ancestors' caches all
/// went stale at once. Deepest rows are computed first so each parent reads
/// settled child values.
pub fn recompute_childwidths(store: &mut BlockStore, config: &LayoutConfig) {
    let mut order: Vec<(usize, BlockId)> = store
        .iter()
        .map(|b| {
            let mut depth = 0usize;
            let mut parent = b.parent;
            while let Some(id) = parent {
                depth += 1;
                if depth > store.len() {
                    break;
                }
                parent = store.get(id).and_then(|p| p.parent);
            }
            (depth, b.id)
        })
        .collect();
    order.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, id) in order {
        let children = store.children_of(Some(id));
        let total = if children.is_empty() {
            0.0
        } else {
            group_width(store, &children, config.spacing_x)
        };
        store.get_mut(id).expect("id from the store").childwidth = total;
    }
}

#[cfg(test)]
mod tests;
