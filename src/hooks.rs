// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lifecycle signals raised by the engine.
//!
//! `snapping` and `moving` are cancelable: returning `false` vetoes the
//! attach and drives the discard/rollback branch of the drop. A veto is a
//! normal outcome, never an error.

use crate::model::{BlockId, TemplateId};

#[allow(unused_variables)]
pub trait DiagramHooks {
    /// A palette template was grabbed and a new-block drag started.
    fn template_grabbed(&mut self, template: &TemplateId) {}

    /// The pointer released a new-block drag, whatever the outcome.
    fn template_released(&mut self, template: &TemplateId) {}

    /// A dropped block is about to attach under `parent` (`None` for the
    /// first block of the diagram, which attaches to the canvas itself).
    /// Return `false` to discard the block instead.
    fn snapping(&mut self, id: BlockId, parent: Option<BlockId>) -> bool {
        true
    }

    /// A rearranged block is about to re-parent under `target`. Return
    /// `false` to reject; the subtree then rolls back to its previous
    /// parent (or is discarded under the unlink-on-drag policy).
    fn moving(&mut self, id: BlockId, target: BlockId) -> bool {
        true
    }

    /// A placed block was clicked outside of any drag.
    fn block_selected(&mut self, id: BlockId) {}
}

/// Accept-all default hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl DiagramHooks for NoHooks {}
