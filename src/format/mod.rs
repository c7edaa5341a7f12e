// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The export/import transfer object.
//!
//! [`Output`] carries the host's opaque markup, the block records verbatim,
//! and per-block presentation metadata. Geometry is trusted on import and
//! renormalized by a single layout pass afterwards; topology is what the
//! round-trip contract guarantees.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Block, BlockData, BlockId, BlockIdError, Point, Size};

/// Wire value marking a root block's parent.
pub const ROOT_SENTINEL: i64 = -1;

/// Serialized form of one [`Block`]. Parent pointers travel as signed ids
/// with `-1` for the root, matching the historical wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BlockRecord {
    pub id: u32,
    pub parent: i64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub childwidth: f64,
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id.get(),
            parent: block.parent.map_or(ROOT_SENTINEL, |p| i64::from(p.get())),
            x: block.x,
            y: block.y,
            width: block.width,
            height: block.height,
            childwidth: block.childwidth,
        }
    }
}

impl TryFrom<&BlockRecord> for Block {
    type Error = ImportError;

    fn try_from(record: &BlockRecord) -> Result<Self, Self::Error> {
        let parent = if record.parent == ROOT_SENTINEL {
            None
        } else {
            let id = BlockId::try_from(record.parent).map_err(|source| {
                ImportError::InvalidParent { id: record.id, source }
            })?;
            Some(id)
        };

        let mut block = Block::new(
            BlockId::new(record.id),
            parent,
            Point::new(record.x, record.y),
            Size::new(record.width, record.height),
        );
        block.childwidth = record.childwidth;
        Ok(block)
    }
}

/// Complete serialized diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Output {
    /// Opaque canvas markup, owned by the host and round-tripped verbatim.
    #[serde(rename = "hostMarkup")]
    pub host_markup: String,
    /// Block records, verbatim geometry included.
    pub blocks: Vec<BlockRecord>,
    /// Per-block presentation metadata extracted by the host at export time.
    pub fields: Vec<BlockData>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    InvalidParent { id: u32, source: BlockIdError },
    UnknownParent { id: u32, parent: u32 },
    ParentCycle { id: u32 },
    DuplicateId { id: u32 },
    MultipleRoots { first: u32, second: u32 },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParent { id, source } => {
                write!(f, "block {id} has an invalid parent pointer: {source}")
            }
            Self::UnknownParent { id, parent } => {
                write!(f, "block {id} points at a missing parent {parent}")
            }
            Self::ParentCycle { id } => {
                write!(f, "parent chain of block {id} never reaches the root")
            }
            Self::DuplicateId { id } => write!(f, "duplicate block id {id}"),
            Self::MultipleRoots { first, second } => {
                write!(f, "multiple root blocks ({first} and {second})")
            }
        }
    }
}

impl std::error::Error for ImportError {}

/// Validates and decodes the records of an [`Output`] into model blocks.
///
/// Geometry is trusted; the structural invariants the store cannot represent
/// (duplicate ids, more than one root, malformed or dangling parent
/// pointers, parent cycles) are rejected.
pub fn decode_blocks(output: &Output) -> Result<Vec<Block>, ImportError> {
    let mut blocks = Vec::with_capacity(output.blocks.len());
    let mut root: Option<u32> = None;

    for record in &output.blocks {
        if output.blocks.iter().filter(|r| r.id == record.id).count() > 1 {
            return Err(ImportError::DuplicateId { id: record.id });
        }
        if record.parent == ROOT_SENTINEL {
            if let Some(first) = root {
                return Err(ImportError::MultipleRoots { first, second: record.id });
            }
            root = Some(record.id);
        }
        blocks.push(Block::try_from(record)?);
    }

    // every parent pointer must resolve, and every chain must reach the
    // root within the record count
    let parent_of: BTreeMap<BlockId, Option<BlockId>> =
        blocks.iter().map(|b| (b.id, b.parent)).collect();
    for block in &blocks {
        let Some(parent) = block.parent else {
            continue;
        };
        if !parent_of.contains_key(&parent) {
            return Err(ImportError::UnknownParent {
                id: block.id.get(),
                parent: parent.get(),
            });
        }
        let mut cursor = Some(parent);
        let mut steps = 0usize;
        while let Some(id) = cursor {
            steps += 1;
            if steps > blocks.len() {
                return Err(ImportError::ParentCycle { id: block.id.get() });
            }
            cursor = parent_of.get(&id).copied().flatten();
        }
    }

    Ok(blocks)
}
