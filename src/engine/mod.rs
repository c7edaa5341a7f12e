// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The diagram engine: store, router, layout, and drag lifecycle in one
//! facade the host drives from its pointer events.
//!
//! All mutation is synchronous. The one async entry point,
//! [`add_linked_block`], waits on a revision watch channel instead of
//! polling, and fails with an explicit timeout.

use std::fmt;
use std::time::Duration;

use tokio::sync::watch;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::connector::ConnectorSet;
use crate::drag::{
    collect_subtree, edge_scroll, hit_test, DragContext, DragMode, DropOutcome, StashedBlock,
    SubtreeStash,
};
use crate::format::{decode_blocks, Output};
use crate::hooks::{DiagramHooks, NoHooks};
use crate::host::Host;
use crate::layout::{self, LayoutConfig};
use crate::model::{Block, BlockData, BlockId, GrabSource, Point, Rect, Size, TemplateId};
use crate::store::BlockStore;

/// Caller/collaborator bugs surfaced by the public operations. Policy
/// rejection is *not* represented here; it is a normal [`DropOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A grab arrived while another drag was in flight.
    DragInProgress,
    /// A move/release arrived with no drag in flight.
    NoActiveDrag,
    /// A referenced block is not in the store.
    UnknownBlock { id: BlockId },
    /// The host could not measure the template (element not mounted).
    TemplateNotMounted { template: TemplateId },
    /// Programmatic attach requires at least one existing block.
    EmptyDiagram,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DragInProgress => f.write_str("a drag is already in progress"),
            Self::NoActiveDrag => f.write_str("no drag is in progress"),
            Self::UnknownBlock { id } => write!(f, "block {id} is not in the store"),
            Self::TemplateNotMounted { template } => {
                write!(f, "template '{template}' is not mounted")
            }
            Self::EmptyDiagram => f.write_str("the diagram has no blocks to attach to"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Failure of the async programmatic attach.
#[derive(Debug)]
pub enum AttachError {
    /// The diagram had no blocks when the attach was requested.
    EmptyDiagram,
    /// The target block never appeared before the deadline.
    Timeout { target: BlockId },
    /// The engine was dropped while waiting.
    Closed,
    Engine(EngineError),
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDiagram => f.write_str("cannot link to an empty diagram"),
            Self::Timeout { target } => {
                write!(f, "block {target} did not appear before the deadline")
            }
            Self::Closed => f.write_str("engine was dropped while waiting"),
            Self::Engine(err) => write!(f, "attach failed: {err}"),
        }
    }
}

impl std::error::Error for AttachError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

pub struct DiagramEngine<H: Host> {
    store: BlockStore,
    connectors: ConnectorSet,
    config: LayoutConfig,
    host: H,
    hooks: Box<dyn DiagramHooks + Send>,
    /// `None` is the Idle state of the drag machine.
    drag: Option<DragContext>,
    /// When set, rejected rearranges discard the subtree instead of
    /// rolling back to the previous parent.
    unlink_on_drag: bool,
    /// Swallows the click that ends a rearrange drag.
    suppress_select: Option<BlockId>,
    rev_tx: watch::Sender<u64>,
}

impl<H: Host> DiagramEngine<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, LayoutConfig::default())
    }

    pub fn with_config(host: H, config: LayoutConfig) -> Self {
        let (rev_tx, _) = watch::channel(0);
        Self {
            store: BlockStore::new(),
            connectors: ConnectorSet::new(),
            config,
            host,
            hooks: Box::new(NoHooks),
            drag: None,
            unlink_on_drag: false,
            suppress_select: None,
            rev_tx,
        }
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn connectors(&self) -> &ConnectorSet {
        &self.connectors
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn set_hooks(&mut self, hooks: impl DiagramHooks + Send + 'static) {
        self.hooks = Box::new(hooks);
    }

    pub fn set_unlink_on_drag(&mut self, unlink: bool) {
        self.unlink_on_drag = unlink;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_context(&self) -> Option<&DragContext> {
        self.drag.as_ref()
    }

    /// Candidate parent under the pointer, for the host's drop indicator.
    pub fn indicator_target(&self) -> Option<BlockId> {
        self.drag.as_ref().and_then(|ctx| ctx.hover)
    }

    /// Monotonic store revision, bumped on every mutation.
    pub fn revision(&self) -> u64 {
        *self.rev_tx.borrow()
    }

    /// Subscribes to store revisions; used by the async attach wait.
    pub fn watch_revision(&self) -> watch::Receiver<u64> {
        self.rev_tx.subscribe()
    }

    fn touch(&mut self) {
        self.rev_tx.send_modify(|rev| *rev += 1);
    }

    // ----------------------------------------------------------------
    // grab
    // ----------------------------------------------------------------

    /// Starts a drag from whatever the host classified under the pointer.
    /// `grip` is the pointer offset inside the grabbed element.
    pub fn grab(
        &mut self,
        source: GrabSource,
        pointer: Point,
        grip: Point,
    ) -> Result<BlockId, EngineError> {
        match source {
            GrabSource::Template(template) => self.grab_template(template, pointer, grip),
            GrabSource::PlacedBlock(id) => {
                self.grab_block(id, pointer)?;
                Ok(id)
            }
        }
    }

    /// Clones a palette template into a new-block drag. The new id is
    /// allocated immediately; the block itself only exists after a
    /// successful drop.
    pub fn grab_template(
        &mut self,
        template: TemplateId,
        pointer: Point,
        grip: Point,
    ) -> Result<BlockId, EngineError> {
        if self.drag.is_some() {
            return Err(EngineError::DragInProgress);
        }
        let size = self
            .host
            .measure_template(&template)
            .ok_or_else(|| EngineError::TemplateNotMounted { template: template.clone() })?;

        let id = self.store.next_id();
        self.hooks.template_grabbed(&template);
        debug!(%id, template = %template, "template grabbed");

        self.drag = Some(DragContext {
            id,
            rect: Rect::new(pointer.x - grip.x, pointer.y - grip.y, size.width, size.height),
            grip,
            hover: None,
            mode: DragMode::New { template },
        });
        Ok(id)
    }

    /// Picks up an existing block for rearrangement, detaching its whole
    /// subtree breadth-first into the stash.
    pub fn grab_block(&mut self, id: BlockId, pointer: Point) -> Result<(), EngineError> {
        if self.drag.is_some() {
            return Err(EngineError::DragInProgress);
        }
        let picked = *self.store.get(id).ok_or(EngineError::UnknownBlock { id })?;
        let canvas = self.host.canvas();

        let top_left = canvas.to_pointer(Point::new(picked.left(), picked.top()));
        let rect = Rect::new(top_left.x, top_left.y, picked.width, picked.height);
        let grip = Point::new(pointer.x - rect.left, pointer.y - rect.top);

        let mut stash = SubtreeStash::default();
        for member in collect_subtree(&self.store, id) {
            let block = self
                .store
                .remove(member)
                .expect("subtree ids come from the store");
            let connector = if member == id {
                // the picked block's own incoming connector is gone for good
                self.connectors.remove(member);
                None
            } else {
                self.connectors.remove(member)
            };
            stash.push(StashedBlock {
                offset: Point::new(block.x - picked.x, block.y - picked.y),
                block,
                connector,
            });
        }
        debug!(%id, stashed = stash.len(), "subtree picked up");

        if !self.store.is_empty() {
            layout::recompute_childwidths(&mut self.store, &self.config);
            if self.store.len() > 1 {
                layout::rearrange(&mut self.store, &mut self.connectors, &self.config);
            }
        }

        self.drag = Some(DragContext {
            id,
            rect,
            grip,
            hover: None,
            mode: DragMode::Rearrange { prev_parent: picked.parent, stash },
        });
        self.touch();
        Ok(())
    }

    // ----------------------------------------------------------------
    // drag
    // ----------------------------------------------------------------

    /// Tracks the pointer: moves the dragged footprint, auto-scrolls near
    /// the canvas edges, and refreshes the drop-indicator candidate.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(ctx) = self.drag.as_mut() else {
            return;
        };
        ctx.rect.left = pointer.x - ctx.grip.x;
        ctx.rect.top = pointer.y - ctx.grip.y;

        let canvas = self.host.canvas();
        if let Some((dx, dy)) = edge_scroll(pointer, canvas.rect) {
            self.host.scroll_by(dx, dy);
        }

        let canvas = self.host.canvas();
        let center = canvas.to_canvas(ctx.rect.center());
        let top_y = center.y - ctx.rect.height / 2.0;
        ctx.hover = hit_test(&self.store, center.x, top_y, self.config.spacing_x);
    }

    // ----------------------------------------------------------------
    // drop
    // ----------------------------------------------------------------

    /// Ends the drag and resolves one of the terminal outcomes. Every
    /// branch leaves the store consistent: the stash is either merged back
    /// in full or discarded in full.
    pub fn release(&mut self, pointer: Point) -> Result<DropOutcome, EngineError> {
        self.pointer_move(pointer);
        let ctx = self.drag.take().ok_or(EngineError::NoActiveDrag)?;
        let DragContext { id, rect, mode, .. } = ctx;

        let outcome = match mode {
            DragMode::New { template } => self.drop_new(id, rect, &template),
            DragMode::Rearrange { prev_parent, stash } => {
                self.drop_rearrange(id, rect, prev_parent, stash)
            }
        };
        debug!(%id, ?outcome, "drop resolved");
        Ok(outcome)
    }

    fn drop_new(&mut self, id: BlockId, rect: Rect, template: &TemplateId) -> DropOutcome {
        self.hooks.template_released(template);
        let canvas = self.host.canvas();

        if self.store.is_empty() {
            // the first block only lands below-and-right of the canvas
            // origin; placement is absolute-style
            if rect.top > canvas.rect.top && rect.left > canvas.rect.left {
                let center = canvas.to_canvas(rect.center());
                self.hooks.snapping(id, None);
                self.store.add(Block::new(id, None, center, rect.size()));
                self.touch();
                return DropOutcome::BecameRoot { id };
            }
            return DropOutcome::Discarded { id };
        }

        let center = canvas.to_canvas(rect.center());
        let top_y = center.y - rect.height / 2.0;
        match hit_test(&self.store, center.x, top_y, self.config.spacing_x) {
            Some(target) if self.hooks.snapping(id, Some(target)) => {
                self.attach_new(id, rect.size(), target);
                DropOutcome::Snapped { id, parent: target }
            }
            _ => DropOutcome::Discarded { id },
        }
    }

    fn drop_rearrange(
        &mut self,
        id: BlockId,
        rect: Rect,
        prev_parent: Option<BlockId>,
        stash: SubtreeStash,
    ) -> DropOutcome {
        let canvas = self.host.canvas();
        let center = canvas.to_canvas(rect.center());
        self.suppress_select = Some(id);

        // the root never re-parents: merge back wherever it was dragged
        if prev_parent.is_none() {
            self.merge_stash_at(center, stash);
            return DropOutcome::RootMoved { id };
        }

        let top_y = center.y - rect.height / 2.0;
        match hit_test(&self.store, center.x, top_y, self.config.spacing_x) {
            Some(target) if self.hooks.moving(id, target) => {
                self.attach_stash(stash, target);
                DropOutcome::RearrangeSnapped { id, parent: target }
            }
            _ => {
                if self.unlink_on_drag {
                    let blocks = stash.len();
                    drop(stash);
                    self.touch();
                    DropOutcome::DeletedSubtree { id, blocks }
                } else {
                    let parent =
                        prev_parent.expect("non-root drags always have a previous parent");
                    self.attach_stash(stash, parent);
                    DropOutcome::ReturnedToOrigin { id, parent }
                }
            }
        }
    }

    /// Creates a new block under `target` and runs the global relayout.
    fn attach_new(&mut self, id: BlockId, size: Size, target: BlockId) {
        let parent = *self
            .store
            .get(target)
            .expect("hit-test targets come from the store");

        let (x, y) = self.slot_under(&parent, size);
        self.store.add(Block::new(id, Some(target), Point::new(x, y), size));

        let parent_ref = self.store.get(target).expect("parent exists");
        let child_ref = self.store.get(id).expect("just added");
        self.connectors.route(parent_ref, child_ref, self.config.spacing_y);

        self.finish_attach(target);
    }

    /// Re-merges a stashed subtree under `target` (snap or rollback), with
    /// every descendant translated into the new frame.
    fn attach_stash(&mut self, stash: SubtreeStash, target: BlockId) {
        let parent = *self
            .store
            .get(target)
            .expect("attach targets survive the drag");
        let picked = &stash.picked().block;
        let size = Size::new(picked.width, picked.height);
        let root_id = picked.id;

        let (root_x, root_y) = self.slot_under(&parent, size);
        for (index, entry) in stash.into_entries().into_iter().enumerate() {
            let mut block = entry.block;
            block.x = root_x + entry.offset.x;
            block.y = root_y + entry.offset.y;
            if index == 0 {
                block.parent = Some(target);
            }
            self.store.add(block);
            if let Some(connector) = entry.connector {
                self.connectors.insert(connector);
            }
        }

        let parent_ref = self.store.get(target).expect("parent exists");
        let root_ref = self.store.get(root_id).expect("just merged");
        self.connectors.route(parent_ref, root_ref, self.config.spacing_y);

        self.finish_attach(target);
    }

    /// Sibling slot for a block of `size` appended under `parent`: past all
    /// current children, one generation down.
    fn slot_under(&self, parent: &Block, size: Size) -> (f64, f64) {
        let children = self.store.children_of(Some(parent.id));
        let mut total = size.width;
        for child in &children {
            let child = self.store.get(*child).expect("child ids come from the store");
            total += child.effective_width() + self.config.spacing_x;
        }
        let x = parent.x + total / 2.0 - size.width / 2.0;
        let y = parent.y + parent.height / 2.0 + self.config.spacing_y + size.height / 2.0;
        (x, y)
    }

    /// Common tail of every successful attach: ancestor childwidths, global
    /// relayout, offset correction.
    fn finish_attach(&mut self, target: BlockId) {
        layout::propagate_upward(&mut self.store, target, &self.config);
        layout::rearrange(&mut self.store, &mut self.connectors, &self.config);
        layout::correct_offset(&mut self.store, &mut self.connectors, &self.config);
        self.touch();
    }

    /// Merges the dragged root's stash back at `center`, refreshing every
    /// connector from the restored positions. No re-parenting happens.
    fn merge_stash_at(&mut self, center: Point, stash: SubtreeStash) {
        for entry in stash.into_entries() {
            let mut block = entry.block;
            block.x = center.x + entry.offset.x;
            block.y = center.y + entry.offset.y;
            self.store.add(block);
            if let Some(connector) = entry.connector {
                self.connectors.insert(connector);
            }
        }

        let pairs: Vec<(BlockId, BlockId)> = self
            .store
            .iter()
            .filter_map(|b| b.parent.map(|p| (b.id, p)))
            .collect();
        for (child_id, parent_id) in pairs {
            let parent = self.store.get(parent_id).expect("parent exists");
            let child = self.store.get(child_id).expect("child exists");
            self.connectors.update(parent, child, self.config.spacing_y);
        }
        self.touch();
    }

    // ----------------------------------------------------------------
    // selection
    // ----------------------------------------------------------------

    /// Reports a click on a placed block. The click that ends a rearrange
    /// drag is swallowed once instead of raising `block_selected`.
    pub fn select_block(&mut self, id: BlockId) -> Result<(), EngineError> {
        if !self.store.contains(id) {
            return Err(EngineError::UnknownBlock { id });
        }
        if self.suppress_select.take() == Some(id) {
            return Ok(());
        }
        self.suppress_select = None;
        self.hooks.block_selected(id);
        Ok(())
    }

    // ----------------------------------------------------------------
    // serialization
    // ----------------------------------------------------------------

    /// Serializes the diagram: host markup, block records verbatim, and
    /// per-block data/attr extracted by the host.
    pub fn output(&self) -> Output {
        let blocks = self.store.iter().map(Into::into).collect();
        let fields = self
            .store
            .iter()
            .map(|b| BlockData {
                id: b.id.get(),
                parent: b.parent.map_or(crate::format::ROOT_SENTINEL, |p| i64::from(p.get())),
                data: self.host.block_data(b.id),
                attr: self.host.block_attrs(b.id),
            })
            .collect();
        Output {
            host_markup: self.host.export_markup(),
            blocks,
            fields,
        }
    }

    /// Replaces the whole diagram with a serialized one. Imported geometry
    /// is trusted; a single layout pass afterwards may renormalize it.
    pub fn import(&mut self, output: &Output) -> Result<(), crate::format::ImportError> {
        let blocks = decode_blocks(output)?;

        self.host.import_markup(&output.host_markup);
        self.store.reset();
        self.connectors.clear();
        self.drag = None;
        self.suppress_select = None;
        for block in blocks {
            self.store.add(block);
        }

        if self.store.len() > 1 {
            layout::rearrange(&mut self.store, &mut self.connectors, &self.config);
            layout::correct_offset(&mut self.store, &mut self.connectors, &self.config);
        }
        self.touch();
        Ok(())
    }

    /// Empties the store and clears the host's canvas markup.
    pub fn delete_all(&mut self) {
        self.store.reset();
        self.connectors.clear();
        self.drag = None;
        self.suppress_select = None;
        self.host.clear_markup();
        self.touch();
    }

    // ----------------------------------------------------------------
    // programmatic attach
    // ----------------------------------------------------------------

    /// Synchronous core of [`add_linked_block`]: clones `template` and
    /// attaches it under `target` immediately. No snapping consultation
    /// happens on this path; scripted attaches are unconditional.
    pub fn attach_template(
        &mut self,
        template: TemplateId,
        target: BlockId,
    ) -> Result<BlockId, EngineError> {
        if self.store.is_empty() {
            return Err(EngineError::EmptyDiagram);
        }
        if !self.store.contains(target) {
            return Err(EngineError::UnknownBlock { id: target });
        }
        let size = self
            .host
            .measure_template(&template)
            .ok_or(EngineError::TemplateNotMounted { template })?;

        let id = self.store.next_id();
        self.attach_new(id, size, target);
        Ok(id)
    }
}

impl<H: Host + fmt::Debug> fmt::Debug for DiagramEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramEngine")
            .field("store", &self.store)
            .field("connectors", &self.connectors)
            .field("config", &self.config)
            .field("host", &self.host)
            .field("dragging", &self.drag.is_some())
            .field("unlink_on_drag", &self.unlink_on_drag)
            .finish_non_exhaustive()
    }
}

/// Waits for `target` to exist, then attaches a clone of `template` under
/// it. Resolution is driven by store observation (the revision watch
/// channel), not polling; `wait` bounds the whole operation.
pub async fn add_linked_block<H: Host>(
    engine: &Mutex<DiagramEngine<H>>,
    template: TemplateId,
    target: BlockId,
    wait: Duration,
) -> Result<BlockId, AttachError> {
    let mut rx = {
        let guard = engine.lock().await;
        if guard.store().is_empty() {
            return Err(AttachError::EmptyDiagram);
        }
        guard.watch_revision()
    };

    let deadline = Instant::now() + wait;
    loop {
        {
            let mut guard = engine.lock().await;
            let mounted = guard.host().measure_template(&template).is_some();
            if guard.store().contains(target) && mounted {
                return guard
                    .attach_template(template.clone(), target)
                    .map_err(AttachError::Engine);
            }
        }
        match tokio::time::timeout_at(deadline, rx.changed()).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => return Err(AttachError::Closed),
            Err(_) => return Err(AttachError::Timeout { target }),
        }
    }
}
