// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering/host collaborator boundary.
//!
//! The engine is headless: everything that touches real elements lives
//! behind [`Host`]. Geometry reads are assumed synchronous and consistent
//! at read time; an element that is not mounted yet answers `None`, which
//! the engine treats as retryable, never as a crash.

pub mod fixtures;

use crate::model::{Attribute, BlockId, FieldValue, Point, Rect, Size, TemplateId};

/// Canvas placement in the pointer coordinate space, plus its scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasMetrics {
    /// Viewport rectangle of the canvas in pointer coordinates.
    pub rect: Rect,
    /// Current scroll offset of the canvas content.
    pub scroll: Point,
}

impl CanvasMetrics {
    /// Maps a pointer-space point into canvas content coordinates.
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x - self.rect.left + self.scroll.x,
            p.y - self.rect.top + self.scroll.y,
        )
    }

    /// Maps a canvas content point back into pointer space.
    pub fn to_pointer(&self, p: Point) -> Point {
        Point::new(
            p.x + self.rect.left - self.scroll.x,
            p.y + self.rect.top - self.scroll.y,
        )
    }
}

pub trait Host {
    /// Current canvas placement and scroll.
    fn canvas(&self) -> CanvasMetrics;

    /// Footprint of a palette template; `None` while unmounted.
    fn measure_template(&self, template: &TemplateId) -> Option<Size>;

    /// Footprint of a placed block's element; `None` while unmounted.
    fn measure_block(&self, id: BlockId) -> Option<Size>;

    /// Auto-scroll request from the drag loop.
    fn scroll_by(&mut self, dx: f64, dy: f64);

    /// Opaque serialized canvas markup, owned by the host.
    fn export_markup(&self) -> String;

    /// Replaces the canvas markup wholesale (import side).
    fn import_markup(&mut self, markup: &str);

    /// Clears the canvas markup (whole-store reset).
    fn clear_markup(&mut self);

    /// Form values rendered inside the block, captured for serialization.
    fn block_data(&self, id: BlockId) -> Vec<FieldValue>;

    /// Element attributes of the block, captured for serialization.
    fn block_attrs(&self, id: BlockId) -> Vec<Attribute>;
}

#[cfg(test)]
mod tests {
    use super::CanvasMetrics;
    use crate::model::{Point, Rect};

    #[test]
    fn pointer_and_canvas_spaces_round_trip() {
        let metrics = CanvasMetrics {
            rect: Rect::new(40.0, 25.0, 800.0, 600.0),
            scroll: Point::new(120.0, 0.0),
        };

        let canvas = metrics.to_canvas(Point::new(50.0, 30.0));
        assert_eq!(canvas, Point::new(130.0, 5.0));
        assert_eq!(metrics.to_pointer(canvas), Point::new(50.0, 30.0));
    }
}
