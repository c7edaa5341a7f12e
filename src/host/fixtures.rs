// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic in-memory host for tests and benches.

use std::collections::BTreeMap;

use super::{CanvasMetrics, Host};
use crate::model::{Attribute, BlockId, FieldValue, Point, Rect, Size, TemplateId};

/// A host whose canvas sits at the pointer-space origin with no scroll,
/// making pointer and canvas coordinates coincide unless configured
/// otherwise. Templates must be registered up front; unknown templates
/// measure as `None` (unmounted).
#[derive(Debug, Clone)]
pub struct StaticHost {
    pub metrics: CanvasMetrics,
    pub templates: BTreeMap<TemplateId, Size>,
    pub block_sizes: BTreeMap<BlockId, Size>,
    pub default_block_size: Size,
    pub markup: String,
    pub fields: BTreeMap<BlockId, Vec<FieldValue>>,
    pub attrs: BTreeMap<BlockId, Vec<Attribute>>,
}

impl Default for StaticHost {
    fn default() -> Self {
        Self {
            metrics: CanvasMetrics {
                rect: Rect::new(0.0, 0.0, 1200.0, 800.0),
                scroll: Point::new(0.0, 0.0),
            },
            templates: BTreeMap::new(),
            block_sizes: BTreeMap::new(),
            default_block_size: Size::new(100.0, 40.0),
            markup: String::new(),
            fields: BTreeMap::new(),
            attrs: BTreeMap::new(),
        }
    }
}

impl StaticHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: &str, size: Size) -> Self {
        self.templates.insert(TemplateId::new(name), size);
        self
    }
}

impl Host for StaticHost {
    fn canvas(&self) -> CanvasMetrics {
        self.metrics
    }

    fn measure_template(&self, template: &TemplateId) -> Option<Size> {
        self.templates.get(template).copied()
    }

    fn measure_block(&self, id: BlockId) -> Option<Size> {
        Some(
            self.block_sizes
                .get(&id)
                .copied()
                .unwrap_or(self.default_block_size),
        )
    }

    fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.metrics.scroll.x += dx;
        self.metrics.scroll.y += dy;
    }

    fn export_markup(&self) -> String {
        self.markup.clone()
    }

    fn import_markup(&mut self, markup: &str) {
        self.markup = markup.to_owned();
    }

    fn clear_markup(&mut self) {
        self.markup.clear();
    }

    fn block_data(&self, id: BlockId) -> Vec<FieldValue> {
        self.fields.get(&id).cloned().unwrap_or_default()
    }

    fn block_attrs(&self, id: BlockId) -> Vec<Attribute> {
        self.attrs.get(&id).cloned().unwrap_or_default()
    }
}
