// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{BlockId, TemplateId};

/// What the pointer went down on, as classified by the host.
///
/// The host owns element inspection; the engine only ever sees this tag.
/// Grabbing a [`Template`](GrabSource::Template) starts a new-block drag,
/// grabbing a [`PlacedBlock`](GrabSource::PlacedBlock) picks up an existing
/// block together with its whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabSource {
    Template(TemplateId),
    PlacedBlock(BlockId),
}
