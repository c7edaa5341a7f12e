// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: blocks, ids, geometry, and the grab-source tag.

pub mod block;
pub mod geometry;
pub mod ids;
pub mod source;

pub use block::{Attribute, Block, BlockData, FieldValue};
pub use geometry::{Point, Rect, Size};
pub use ids::{BlockId, BlockIdError, TemplateId};
pub use source::GrabSource;
