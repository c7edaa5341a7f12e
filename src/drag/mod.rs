// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag lifecycle state and its pure helpers.
//!
//! States: Idle → Grabbed(new | rearrange) → Dragging → {Snapped,
//! RearrangeSnapped, ReturnedToOrigin, Discarded, DeletedSubtree, BecameRoot,
//! RootMoved} → Idle. The stateful transitions live on
//! [`DiagramEngine`](crate::engine::DiagramEngine); this module holds the
//! per-phase context values and the geometry predicates.

use crate::connector::Connector;
use crate::model::{Block, BlockId, Point, Rect, TemplateId};
use crate::store::BlockStore;

/// Width of the edge band that triggers auto-scroll, and the step applied
/// per pointer move while inside it.
pub const EDGE_BAND: f64 = 10.0;
pub const EDGE_STEP: f64 = 10.0;

/// Context of one in-flight drag. A fresh value is produced per phase
/// transition; nothing in here is shared or captured mutably elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    /// Id of the dragged block (pre-allocated for new blocks).
    pub id: BlockId,
    /// Current footprint of the dragged element in pointer space.
    pub rect: Rect,
    /// Pointer offset inside the dragged element, fixed at grab time.
    pub grip: Point,
    /// Candidate parent under the pointer, for the host's drop indicator.
    pub hover: Option<BlockId>,
    pub mode: DragMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    /// Dragging a clone of a palette template.
    New { template: TemplateId },
    /// Dragging an existing block with its stashed subtree.
    Rearrange {
        /// Parent at grab time, for rollback on rejection.
        prev_parent: Option<BlockId>,
        stash: SubtreeStash,
    },
}

/// One detached record plus what is needed to re-merge it: its center
/// offset relative to the dragged block and, for descendants, the incoming
/// connector that was unbound on pick-up.
#[derive(Debug, Clone, PartialEq)]
pub struct StashedBlock {
    pub block: Block,
    pub offset: Point,
    pub connector: Option<Connector>,
}

/// Breadth-first buffer of a detached subtree. Entry 0 is always the picked
/// block itself (offset zero, no stashed connector).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtreeStash {
    entries: Vec<StashedBlock>,
}

impl SubtreeStash {
    pub fn push(&mut self, entry: StashedBlock) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn picked(&self) -> &StashedBlock {
        self.entries.first().expect("stash is never built empty")
    }

    pub fn entries(&self) -> &[StashedBlock] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<StashedBlock> {
        self.entries
    }
}

/// Terminal result of a drop, reported to the caller. Policy rejection and
/// discards are normal outcomes here, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// First block of the diagram landed and became the root.
    BecameRoot { id: BlockId },
    /// New block attached under a hit parent.
    Snapped { id: BlockId, parent: BlockId },
    /// Existing subtree re-parented under a new parent.
    RearrangeSnapped { id: BlockId, parent: BlockId },
    /// The dragged root merged back in place; roots never re-parent.
    RootMoved { id: BlockId },
    /// Rejected rearrange rolled back to the pre-grab parent.
    ReturnedToOrigin { id: BlockId, parent: BlockId },
    /// New block discarded (missed the canvas, missed every target, or the
    /// snapping hook vetoed).
    Discarded { id: BlockId },
    /// Rejected rearrange discarded the whole subtree (unlink-on-drag).
    DeletedSubtree { id: BlockId, blocks: usize },
}

/// First block in store order whose attach zone contains the dragged
/// element, given the dragged center-x and top-y in canvas coordinates.
///
/// The zone is `[x − w/2 − spacing_x, x + w/2 + spacing_x]` horizontally
/// and `[y − h/2, y + h]` vertically. No closest-match tie-break: store
/// order decides.
pub fn hit_test(
    store: &BlockStore,
    center_x: f64,
    top_y: f64,
    spacing_x: f64,
) -> Option<BlockId> {
    store
        .iter()
        .find(|b| {
            center_x >= b.x - b.width / 2.0 - spacing_x
                && center_x <= b.x + b.width / 2.0 + spacing_x
                && top_y >= b.y - b.height / 2.0
                && top_y <= b.y + b.height
        })
        .map(|b| b.id)
}

/// Ids of `root` and all its descendants, breadth-first.
pub fn collect_subtree(store: &BlockStore, root: BlockId) -> Vec<BlockId> {
    let mut order = vec![root];
    let mut cursor = 0;
    while cursor < order.len() {
        let parent = order[cursor];
        cursor += 1;
        for block in store.iter() {
            if block.parent == Some(parent) {
                order.push(block.id);
            }
        }
    }
    order
}

/// Scroll delta when the pointer sits in the edge band of `viewport`, one
/// axis at a time with the horizontal edges winning ties.
pub fn edge_scroll(pointer: Point, viewport: Rect) -> Option<(f64, f64)> {
    if (pointer.x - viewport.right()).abs() < EDGE_BAND {
        Some((EDGE_STEP, 0.0))
    } else if (pointer.x - viewport.left).abs() < EDGE_BAND {
        Some((-EDGE_STEP, 0.0))
    } else if (pointer.y - viewport.bottom()).abs() < EDGE_BAND {
        Some((0.0, EDGE_STEP))
    } else if (pointer.y - viewport.top).abs() < EDGE_BAND {
        Some((0.0, -EDGE_STEP))
    } else {
        None
    }
}

#[cfg(test)]
mod tests;
