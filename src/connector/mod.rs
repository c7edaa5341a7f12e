// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Elbow connector routing between a parent block and one of its children.
//!
//! One connector exists per (parent, child) pair and is keyed by the child
//! id. The two routing branches (child right of parent vs. left of parent)
//! use different anchor insets (20 px vs. 5 px); that asymmetry is
//! observable host behavior and is kept as-is rather than unified.

use std::collections::BTreeMap;

use crate::model::{Block, BlockId};

/// Horizontal inset of the stem below the parent on the rightward branch.
pub const STEM_INSET: f64 = 20.0;
/// Horizontal inset used by the mirrored (leftward) branch.
pub const MIRROR_INSET: f64 = 5.0;

/// Elbow polyline in connector-local coordinates, mirroring the SVG path the
/// host renders: a vertical drop from `(start_x, 0)`, a horizontal run at
/// `bend_y`, and a final drop to `(end_x, end_y)` where the arrowhead sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElbowPath {
    pub start_x: f64,
    pub bend_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// A routed connector bound to a source (parent) and target (child) block.
///
/// `left`/`top` position the connector's local origin in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    source: BlockId,
    target: BlockId,
    path: ElbowPath,
    left: f64,
    top: f64,
}

impl Connector {
    /// Routes a fresh connector for `child` hanging off `parent`.
    pub fn route(parent: &Block, child: &Block, spacing_y: f64) -> Self {
        let mut connector = Self {
            source: parent.id,
            target: child.id,
            path: ElbowPath { start_x: 0.0, bend_y: 0.0, end_x: 0.0, end_y: 0.0 },
            left: 0.0,
            top: 0.0,
        };
        connector.reroute(parent, child, spacing_y);
        connector
    }

    /// Repositions an existing connector in place. Identity (source/target
    /// binding) is preserved; only the geometry changes.
    pub fn update(&mut self, parent: &Block, child: &Block, spacing_y: f64) {
        self.source = parent.id;
        self.target = child.id;
        self.reroute(parent, child, spacing_y);
    }

    fn reroute(&mut self, parent: &Block, child: &Block, spacing_y: f64) {
        let x = child.x - parent.x + STEM_INSET;
        if x < 0.0 {
            // child left of parent: mirrored path, anchored MIRROR_INSET off
            // the child column
            self.path = ElbowPath {
                start_x: parent.x - child.x + MIRROR_INSET,
                bend_y: spacing_y / 2.0,
                end_x: MIRROR_INSET,
                end_y: spacing_y,
            };
            self.left = child.x - MIRROR_INSET;
        } else {
            self.path = ElbowPath {
                start_x: STEM_INSET,
                bend_y: spacing_y / 2.0,
                end_x: x,
                end_y: spacing_y,
            };
            self.left = parent.x - STEM_INSET;
        }
        self.top = parent.y + parent.height / 2.0;
    }

    pub fn source(&self) -> BlockId {
        self.source
    }

    pub fn target(&self) -> BlockId {
        self.target
    }

    pub fn path(&self) -> &ElbowPath {
        &self.path
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }
}

/// All live connectors of a diagram, keyed by the child id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorSet {
    connectors: BTreeMap<BlockId, Connector>,
}

impl ConnectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    pub fn get(&self, child: BlockId) -> Option<&Connector> {
        self.connectors.get(&child)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connector> {
        self.connectors.values()
    }

    /// Binds a freshly routed connector for `child`, replacing any previous
    /// one keyed under the same child.
    pub fn route(&mut self, parent: &Block, child: &Block, spacing_y: f64) {
        self.connectors
            .insert(child.id, Connector::route(parent, child, spacing_y));
    }

    /// Repositions the connector of `child` in place, routing a fresh one
    /// when the child has none yet (import restores markup, not router
    /// state, so the first layout pass after import lands here).
    pub fn update(&mut self, parent: &Block, child: &Block, spacing_y: f64) {
        match self.connectors.get_mut(&child.id) {
            Some(connector) => connector.update(parent, child, spacing_y),
            None => self.route(parent, child, spacing_y),
        }
    }

    /// Reinserts a stashed connector (subtree re-merge after a drag).
    pub fn insert(&mut self, connector: Connector) {
        self.connectors.insert(connector.target(), connector);
    }

    pub fn remove(&mut self, child: BlockId) -> Option<Connector> {
        self.connectors.remove(&child)
    }

    pub fn clear(&mut self) {
        self.connectors.clear();
    }
}
