// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Larissa — headless drag-and-drop flowchart engine.
//!
//! The engine owns the block tree, the tree layout, the elbow connector
//! router, and the drag lifecycle. Everything that touches real rendered
//! elements lives behind the [`host::Host`] trait; the engine itself never
//! renders.

pub mod connector;
pub mod drag;
pub mod engine;
pub mod format;
pub mod hooks;
pub mod host;
pub mod layout;
pub mod model;
pub mod store;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
