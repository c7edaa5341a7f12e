// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Authoritative, insertion-ordered collection of [`Block`] records.
//!
//! The store is a parent-pointer tree kept in a flat `Vec`. Insertion order
//! is load-bearing: sibling order during layout and hit-test tie-breaks both
//! follow store order, so `remove` keeps the order of everything else and
//! `add` always appends.

use smallvec::SmallVec;

use crate::model::{Block, BlockId};

/// Child id lists are short in practice; keep them off the heap.
pub type ChildIds = SmallVec<[BlockId; 4]>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStore {
    blocks: Vec<Block>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Block> {
        self.blocks.iter_mut()
    }

    /// Appends a record. The caller is responsible for id uniqueness; the
    /// engine always allocates through [`next_id`](Self::next_id).
    pub fn add(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Removes exactly one record, preserving the order of the rest.
    /// There is no implicit cascade: children of the removed block keep
    /// their (now dangling) parent pointer and must be handled by the
    /// caller, which is what the drag machine's subtree stash does.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Direct children of `parent`, in insertion order. `None` selects the
    /// root row.
    pub fn children_of(&self, parent: Option<BlockId>) -> ChildIds {
        self.blocks
            .iter()
            .filter(|b| b.parent == parent)
            .map(|b| b.id)
            .collect()
    }

    pub fn child_count(&self, id: BlockId) -> usize {
        self.blocks.iter().filter(|b| b.parent == Some(id)).count()
    }

    pub fn root(&self) -> Option<&Block> {
        self.blocks.iter().find(|b| b.is_root())
    }

    /// `0` on an empty store, else `max(ids) + 1`.
    pub fn next_id(&self) -> BlockId {
        let next = self
            .blocks
            .iter()
            .map(|b| b.id.get())
            .max()
            .map_or(0, |max| max + 1);
        BlockId::new(next)
    }

    pub fn reset(&mut self) {
        self.blocks.clear();
    }
}
