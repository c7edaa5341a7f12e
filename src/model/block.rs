// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};
use super::ids::BlockId;

/// A positioned diagram node.
///
/// `x`/`y` are the block's *center* in canvas coordinates. `width`/`height`
/// are the rendered footprint supplied by the host when the block was
/// created. `childwidth` caches the horizontal space the block's whole
/// descendant subtree needs; it is `0.0` for leaves and is maintained by the
/// layout engine on every structural change.
///
/// The record is deliberately a plain mutable value: the layout engine
/// rewrites `x` and `childwidth` wholesale on every pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// `None` marks the diagram root. At most one block per engine is a root.
    pub parent: Option<BlockId>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub childwidth: f64,
}

impl Block {
    pub fn new(id: BlockId, parent: Option<BlockId>, center: Point, size: Size) -> Self {
        Self {
            id,
            parent,
            x: center.x,
            y: center.y,
            width: size.width,
            height: size.height,
            childwidth: 0.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    /// The width a sibling walk must reserve for this block: a subtree wider
    /// than its root centers on the subtree, not on the visual box.
    pub fn effective_width(&self) -> f64 {
        self.width.max(self.childwidth)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A single named form value captured from the host's rendered block.
///
/// `name` is optional because hosts may render unnamed inputs; the value is
/// still carried through serialization verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FieldValue {
    pub name: Option<String>,
    pub value: String,
}

/// A single element attribute captured from the host's rendered block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Presentation metadata for one block, captured only at serialization time.
///
/// The engine never interprets `data`/`attr`; both are extracted by the host
/// and round-trip opaquely through [`Output`](crate::format::Output).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct BlockData {
    pub id: u32,
    /// Wire form of the parent pointer; `-1` is the root sentinel.
    pub parent: i64,
    pub data: Vec<FieldValue>,
    pub attr: Vec<Attribute>,
}
