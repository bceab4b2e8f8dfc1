//! The chart editing model
//!
//! [`Chart`] owns the grid, the layer stack and the editor state around them.
//! Every edit goes through it: the target cell is checked against the grid
//! bounds and the mirror quadrant, one undo snapshot is recorded for the whole
//! operation, and live mirroring is re-applied afterwards.
//!
//! Coordinates passed to a `Chart` are always world (grid) coordinates. Edits
//! land in the active layer, or in the dense grid when the chart has no layers.

use crate::color::Color;
use crate::document::{DesignDocument, DocumentError};
use crate::draw::ShapeSession;
use crate::error::EditError;
use crate::fill::flood_fill;
use crate::grid::DenseGrid;
use crate::layer::{Layer, LayerId};
use crate::layer_stack::LayerStack;
use crate::mirror::{MirrorAxis, MirrorConfig, MirrorEngine};
use crate::palette::Palette;
use crate::selection::{Clipboard, Selection};
use crate::shapes::{rasterize_shape, ShapeKind};
use crate::target::{CellAccess, LayerCells};
use crate::tools::Tool;
use crate::undo::{Snapshot, UndoStore, DEFAULT_MAX_DEPTH};
use std::collections::HashSet;
use tracing::{debug, info};

/// Default grid width and height
pub const DEFAULT_SIZE: u32 = 50;
/// Smallest width or height a chart may be resized to
pub const DEFAULT_MIN_SIZE: u32 = 5;
/// Largest width or height a chart may have
pub const MAX_SIZE: u32 = 4096;
/// Name of the layer a new chart starts with
pub const DEFAULT_LAYER_NAME: &str = "Background";

/// Settings for a new chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub min_size: u32,
    /// Start with one layer. Without it the chart edits its dense grid.
    pub layers: bool,
    pub layer_name: String,
    pub history_depth: usize,
    pub mirror: MirrorConfig,
    pub palette: Palette,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            min_size: DEFAULT_MIN_SIZE,
            layers: true,
            layer_name: DEFAULT_LAYER_NAME.to_string(),
            history_depth: DEFAULT_MAX_DEPTH,
            mirror: MirrorConfig::default(),
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chart {
    grid: DenseGrid,
    layers: LayerStack,
    selection: Selection,
    clipboard: Option<Clipboard>,
    mirror: MirrorEngine,
    history: UndoStore,
    session: ShapeSession,
    palette: Palette,
    tool: Tool,
    fill_shapes: bool,
    /// Where a selection drag started and whether it adds to the selection
    select_anchor: Option<((i32, i32), bool)>,
    min_size: u32,
}

fn check_dimensions(width: u32, height: u32, min: u32) -> Result<(), EditError> {
    if width < min || height < min {
        return Err(EditError::InvalidDimensions { width, height, min });
    }
    if width > MAX_SIZE || height > MAX_SIZE {
        return Err(EditError::DimensionsTooLarge { width, height, max: MAX_SIZE });
    }
    Ok(())
}

/// Write a world cell through a target in its own frame.
fn write_world(target: &mut dyn CellAccess, (wx, wy): (i32, i32), color: Option<Color>) {
    let (x, y) = target.from_world(wx, wy);
    target.set(x, y, color);
}

impl Chart {
    /// A `width`×`height` chart with one "Background" layer.
    pub fn new(width: u32, height: u32) -> Result<Self, EditError> {
        Self::with_options(ChartOptions { width, height, ..Default::default() })
    }

    /// A chart without layers; edits go to the dense grid.
    pub fn flat(width: u32, height: u32) -> Result<Self, EditError> {
        Self::with_options(ChartOptions { width, height, layers: false, ..Default::default() })
    }

    pub fn with_options(options: ChartOptions) -> Result<Self, EditError> {
        let min_size = options.min_size.max(1);
        check_dimensions(options.width, options.height, min_size)?;
        let layers = if options.layers {
            LayerStack::with_layer(options.layer_name)
        } else {
            LayerStack::new()
        };
        info!(width = options.width, height = options.height, layered = options.layers, "created chart");
        Ok(Self {
            grid: DenseGrid::new(options.width, options.height),
            layers,
            selection: Selection::new(),
            clipboard: None,
            mirror: MirrorEngine::new(options.mirror),
            history: UndoStore::new(options.history_depth),
            session: ShapeSession::new(),
            palette: options.palette,
            tool: Tool::default(),
            fill_shapes: false,
            select_anchor: None,
            min_size,
        })
    }

    // Read-only surface

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    pub fn grid(&self) -> &DenseGrid {
        &self.grid
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Whether edits target a layer rather than the dense grid
    pub fn is_layered(&self) -> bool {
        !self.layers.is_empty()
    }

    pub fn active_layer_id(&self) -> Option<LayerId> {
        self.layers.active_id()
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layers.active()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn mirror(&self) -> &MirrorEngine {
        &self.mirror
    }

    pub fn history(&self) -> &UndoStore {
        &self.history
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether rectangles and ellipses are drawn filled
    pub fn shape_fill(&self) -> bool {
        self.fill_shapes
    }

    pub fn is_drawing_shape(&self) -> bool {
        self.session.is_active()
    }

    /// Color of a world cell in the current edit target.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Color> {
        match self.layers.active() {
            Some(layer) => layer.get_world_cell(x, y),
            None => self.grid.get(x, y),
        }
    }

    /// Painted cells of each visible layer in world coordinates, bottom layer
    /// first. Cells positioned outside the grid are left out.
    pub fn visible_layer_cells(&self) -> Vec<(&Layer, Vec<((i32, i32), &Color)>)> {
        self.layers
            .visible_bottom_to_top()
            .map(|layer| {
                let mut cells: Vec<_> =
                    layer.world_cells().filter(|&((x, y), _)| self.grid.in_bounds(x, y)).collect();
                cells.sort_by_key(|&((x, y), _)| (y, x));
                (layer, cells)
            })
            .collect()
    }

    /// Cells of the shape being dragged that would be painted on commit,
    /// in row-major order.
    pub fn shape_preview(&self) -> Vec<(i32, i32)> {
        let mut cells: Vec<_> =
            self.session.preview().into_iter().flatten().copied().filter(|&(x, y)| self.is_editable(x, y)).collect();
        cells.sort_by_key(|&(x, y)| (y, x));
        cells
    }

    /// Whether a user edit may touch the world cell (x, y).
    ///
    /// Cells must be on the grid and, while any mirror axis is enabled, inside
    /// the primary quadrant.
    pub fn is_editable(&self, x: i32, y: i32) -> bool {
        self.check_editable(x, y).is_ok()
    }

    fn check_editable(&self, x: i32, y: i32) -> Result<(), EditError> {
        let (width, height) = (self.width(), self.height());
        if !self.grid.in_bounds(x, y) {
            return Err(EditError::OutOfBounds { x, y, width, height });
        }
        if self.mirror.is_active() && !MirrorEngine::is_in_primary_quadrant(x, y, width, height) {
            return Err(EditError::OutsideMirrorQuadrant { x, y });
        }
        Ok(())
    }

    // Plumbing

    /// Run `op` against the active layer, or the dense grid in flat mode.
    fn with_target<R>(&mut self, op: impl FnOnce(&mut dyn CellAccess) -> R) -> R {
        let (width, height) = (self.grid.width(), self.grid.height());
        match self.layers.active_mut() {
            Some(layer) => op(&mut LayerCells::new(layer, width, height)),
            None => op(&mut self.grid),
        }
    }

    /// Run one user operation under a single undo snapshot.
    ///
    /// The snapshot is taken before `op` runs and kept only if it succeeds.
    /// Operations must not change anything before returning an error.
    fn record<R>(
        &mut self,
        label: &str,
        op: impl FnOnce(&mut Self) -> Result<R, EditError>,
    ) -> Result<R, EditError> {
        let snapshot = Snapshot::new(label, &self.grid, &self.layers);
        match op(self) {
            Ok(value) => {
                self.history.push(snapshot);
                debug!(label, "applied edit");
                Ok(value)
            }
            Err(err) => {
                debug!(label, error = %err, "edit rejected");
                Err(err)
            }
        }
    }

    fn mirror_after_edit(&mut self) {
        if self.mirror.is_active() && self.mirror.live_update() {
            self.reapply_mirror();
        }
    }

    fn reapply_mirror(&mut self) {
        let mirror = self.mirror;
        let (width, height) = (self.width(), self.height());
        self.with_target(|target| mirror.apply(target, width, height));
    }

    // Cell edits

    /// Paint or erase one cell.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Option<Color>) -> Result<(), EditError> {
        self.record("Change cell color", |chart| {
            chart.check_editable(x, y)?;
            chart.with_target(|target| write_world(target, (x, y), color));
            chart.mirror_after_edit();
            Ok(())
        })
    }

    /// Paint one cell with the selected palette color.
    pub fn paint(&mut self, x: i32, y: i32) -> Result<(), EditError> {
        let color = self.palette.selected().clone();
        self.set_cell(x, y, Some(color))
    }

    pub fn erase(&mut self, x: i32, y: i32) -> Result<(), EditError> {
        self.set_cell(x, y, None)
    }

    /// Flood fill from (x, y) with the selected palette color.
    pub fn fill(&mut self, x: i32, y: i32) -> Result<usize, EditError> {
        let color = self.palette.selected().clone();
        self.fill_with(x, y, Some(color))
    }

    /// Flood fill from (x, y); `None` erases the region.
    ///
    /// Returns the number of cells changed. Filling a region with the color it
    /// already has is rejected and leaves no undo entry.
    pub fn fill_with(&mut self, x: i32, y: i32, color: Option<Color>) -> Result<usize, EditError> {
        self.record("Fill area", |chart| {
            chart.check_editable(x, y)?;
            if chart.cell(x, y) == color.as_ref() {
                return Err(EditError::FillNoop { x, y });
            }
            let filled = chart.with_target(|target| {
                let (lx, ly) = target.from_world(x, y);
                flood_fill(target, lx, ly, color)
            });
            chart.mirror_after_edit();
            Ok(filled)
        })
    }

    // Shapes

    /// Start dragging a shape with the current tool.
    pub fn start_shape(&mut self, x: i32, y: i32) -> Result<(), EditError> {
        let kind = self.tool.shape().ok_or_else(|| EditError::NotAShapeTool(self.tool.to_string()))?;
        self.check_editable(x, y)?;
        self.session.start(kind, (x, y), self.fill_shapes);
        debug!(%kind, x, y, "started shape");
        Ok(())
    }

    /// Move the end of the dragged shape; returns the preview size.
    pub fn update_shape(&mut self, x: i32, y: i32) -> Result<usize, EditError> {
        self.session.update_preview((x, y)).map(|cells| cells.len())
    }

    /// Commit the dragged shape ending at (x, y) with the selected color.
    ///
    /// Returns the number of cells painted.
    pub fn finish_shape(&mut self, x: i32, y: i32) -> Result<usize, EditError> {
        let (kind, cells) = self.session.finish((x, y))?;
        self.commit_shape(kind, cells)
    }

    pub fn cancel_shape(&mut self) {
        self.session.cancel();
    }

    /// Draw a complete shape between two corners in one step.
    pub fn draw_shape(
        &mut self,
        kind: ShapeKind,
        from: (i32, i32),
        to: (i32, i32),
        filled: bool,
    ) -> Result<usize, EditError> {
        self.check_editable(from.0, from.1)?;
        self.commit_shape(kind, rasterize_shape(kind, from, to, filled))
    }

    fn commit_shape(&mut self, kind: ShapeKind, cells: HashSet<(i32, i32)>) -> Result<usize, EditError> {
        let color = self.palette.selected().clone();
        let label = format!("Draw {}", kind);
        self.record(&label, |chart| {
            // Off-grid and gated points are dropped, not rejected
            let points: Vec<_> = cells.into_iter().filter(|&(x, y)| chart.is_editable(x, y)).collect();
            chart.with_target(|target| {
                for &point in &points {
                    write_world(target, point, Some(color.clone()));
                }
            });
            chart.mirror_after_edit();
            Ok(points.len())
        })
    }

    pub fn set_shape_fill(&mut self, filled: bool) {
        self.fill_shapes = filled;
    }

    // Grid

    /// Change the grid size, keeping the overlapping cells.
    ///
    /// Clears the selection and cancels any shape being drawn.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EditError> {
        self.record("Resize grid", |chart| {
            check_dimensions(width, height, chart.min_size)?;
            chart.grid.resize(width, height);
            chart.selection.clear();
            chart.session.cancel();
            chart.select_anchor = None;
            info!(width, height, "resized grid");
            Ok(())
        })
    }

    /// Erase the active layer, or the dense grid in flat mode.
    pub fn clear_active_layer(&mut self) {
        self.history.capture("Clear layer", &self.grid, &self.layers);
        self.with_target(|target| target.clear());
    }

    /// Erase the dense grid and every layer.
    pub fn clear_all(&mut self) {
        self.history.capture("Clear all", &self.grid, &self.layers);
        self.grid.clear();
        self.layers.clear_all_cells();
    }

    // Layers

    /// Add a layer on top and make it active. Leaves flat mode.
    pub fn add_layer(&mut self, name: Option<String>) -> LayerId {
        self.history.capture("Add layer", &self.grid, &self.layers);
        self.layers.add_layer(name)
    }

    /// Delete the active layer. The last layer cannot be deleted.
    pub fn delete_layer(&mut self) -> Result<Layer, EditError> {
        self.record("Delete layer", |chart| chart.layers.delete_active())
    }

    /// Make `id` the edit target. Not recorded in history.
    pub fn select_layer(&mut self, id: LayerId) -> Result<(), EditError> {
        self.layers.set_active(id)?;
        debug!(layer = %id, "selected layer");
        Ok(())
    }

    pub fn reorder_layer(&mut self, dragged: LayerId, target: LayerId) -> Result<(), EditError> {
        self.record("Reorder layers", |chart| chart.layers.reorder(dragged, target))
    }

    pub fn merge_down(&mut self) -> Result<LayerId, EditError> {
        let merged = self.record("Merge layers", |chart| chart.layers.merge_down())?;
        info!(layer = %merged, "merged active layer down");
        Ok(merged)
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<bool, EditError> {
        self.record("Toggle layer visibility", |chart| chart.layers.toggle_visibility(id))
    }

    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: u8) -> Result<(), EditError> {
        self.record("Change layer opacity", |chart| chart.layers.set_opacity(id, opacity))
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> Result<(), EditError> {
        self.record("Rename layer", |chart| chart.layers.rename(id, name))
    }

    /// Shift the active layer's offset by (dx, dy).
    pub fn move_active_layer(&mut self, dx: i32, dy: i32) -> Result<(), EditError> {
        self.record("Move layer", |chart| {
            let layer = chart.layers.active_mut().ok_or(EditError::NoLayers)?;
            layer.translate(dx, dy);
            Ok(())
        })
    }

    // Mirror

    /// Flip one mirror axis and return its new state.
    ///
    /// Turning an axis on with live update enabled mirrors the chart right away.
    /// Turning it off leaves mirrored cells in place.
    pub fn toggle_mirror(&mut self, axis: MirrorAxis) -> bool {
        let mut next = self.mirror;
        let enabled = next.toggle(axis);
        if enabled && next.live_update() {
            self.history.capture("Apply mirror", &self.grid, &self.layers);
            self.mirror = next;
            self.reapply_mirror();
        } else {
            self.mirror = next;
        }
        debug!(?axis, enabled, "toggled mirror axis");
        enabled
    }

    pub fn set_mirror_live_update(&mut self, live: bool) {
        self.mirror.set_live_update(live);
    }

    /// Recompute mirrored cells from the primary quadrant on demand.
    pub fn apply_mirror(&mut self) -> Result<(), EditError> {
        self.record("Apply mirror", |chart| {
            if !chart.mirror.is_active() {
                return Err(EditError::MirrorInactive);
            }
            chart.reapply_mirror();
            Ok(())
        })
    }

    // Selection

    pub fn select_rect(&mut self, a: (i32, i32), b: (i32, i32), additive: bool) {
        let (width, height) = (self.width(), self.height());
        self.selection.select_rect(a, b, additive, width, height);
    }

    /// Select one cell, replacing the selection unless `additive`.
    pub fn select_cell(&mut self, x: i32, y: i32, additive: bool) {
        if !additive {
            self.selection.clear();
        }
        let (width, height) = (self.width(), self.height());
        self.selection.add(x, y, width, height);
    }

    pub fn select_all(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.selection.select_all(width, height);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.select_anchor = None;
    }

    /// Copy the selected cells of the edit target. Returns the cell count.
    pub fn copy_selection(&mut self) -> Result<usize, EditError> {
        let clipboard = Clipboard::copy(&self.selection, |x, y| self.cell(x, y)).ok_or(EditError::EmptySelection)?;
        let copied = self.selection.len();
        debug!(copied, width = clipboard.width(), height = clipboard.height(), "copied selection");
        self.clipboard = Some(clipboard);
        Ok(copied)
    }

    /// Copy the selection, then erase it.
    pub fn cut_selection(&mut self) -> Result<usize, EditError> {
        self.copy_selection()?;
        self.erase_selection("Cut selection")
    }

    /// Erase every selected cell. Returns the number of cells erased.
    pub fn delete_selection(&mut self) -> Result<usize, EditError> {
        self.erase_selection("Delete selection")
    }

    fn erase_selection(&mut self, label: &str) -> Result<usize, EditError> {
        self.record(label, |chart| {
            if chart.selection.is_empty() {
                return Err(EditError::EmptySelection);
            }
            let cells: Vec<_> = chart.selection.sorted().into_iter().filter(|&(x, y)| chart.is_editable(x, y)).collect();
            chart.with_target(|target| {
                for &cell in &cells {
                    write_world(target, cell, None);
                }
            });
            chart.mirror_after_edit();
            Ok(cells.len())
        })
    }

    /// Paste the clipboard at the selection's top-left corner, or at the
    /// origin when nothing is selected. Returns the number of cells written.
    pub fn paste(&mut self) -> Result<usize, EditError> {
        self.record("Paste", |chart| {
            let clipboard = chart.clipboard.as_ref().ok_or(EditError::EmptyClipboard)?;
            let origin = chart.selection.bounds().map_or((0, 0), |(top_left, _)| top_left);
            let cells: Vec<_> =
                clipboard.placed_at(origin).filter(|&((x, y), _)| chart.is_editable(x, y)).collect();
            let written = cells.len();
            chart.with_target(|target| {
                for (cell, color) in cells {
                    write_world(target, cell, color);
                }
            });
            chart.mirror_after_edit();
            Ok(written)
        })
    }

    /// Move the selected cells, and the selection, by (dx, dy).
    ///
    /// Cells moved off the grid are lost. Returns the number of cells placed.
    pub fn move_selection(&mut self, dx: i32, dy: i32) -> Result<usize, EditError> {
        self.record("Move selection", |chart| {
            if chart.selection.is_empty() {
                return Err(EditError::EmptySelection);
            }
            let sources: Vec<((i32, i32), Option<Color>)> = chart
                .selection
                .sorted()
                .into_iter()
                .filter(|&(x, y)| chart.is_editable(x, y))
                .map(|(x, y)| ((x, y), chart.cell(x, y).cloned()))
                .collect();
            let placed: Vec<((i32, i32), Option<Color>)> = sources
                .iter()
                .map(|((x, y), color)| ((x + dx, y + dy), color.clone()))
                .filter(|&((x, y), _)| chart.is_editable(x, y))
                .collect();

            chart.with_target(|target| {
                for &(cell, _) in &sources {
                    write_world(target, cell, None);
                }
                for (cell, color) in &placed {
                    write_world(target, *cell, color.clone());
                }
            });

            let (width, height) = (chart.width(), chart.height());
            chart.selection.replace(placed.iter().map(|&(cell, _)| cell), width, height);
            chart.mirror_after_edit();
            Ok(placed.len())
        })
    }

    // Tools and palette

    /// Switch tools. Changing tool clears the selection and drops any shape
    /// being drawn.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            self.selection.clear();
            self.session.cancel();
            self.select_anchor = None;
            debug!(from = %self.tool, to = %tool, "switched tool");
            self.tool = tool;
        }
    }

    pub fn add_color(&mut self, color: Color) -> Result<(), EditError> {
        self.palette.add_color(color)
    }

    pub fn select_color(&mut self, color: Color) {
        self.palette.select_color(color);
    }

    // Pointer input

    /// Pointer pressed on (x, y) with the current tool.
    ///
    /// `additive` is the shift modifier for selections.
    pub fn press(&mut self, x: i32, y: i32, additive: bool) -> Result<(), EditError> {
        match self.tool {
            Tool::Select => {
                self.select_anchor = Some(((x, y), additive));
                self.select_cell(x, y, additive);
                Ok(())
            }
            Tool::Pencil => self.paint(x, y),
            Tool::Eraser => self.erase(x, y),
            Tool::Fill => self.fill(x, y).map(|_| ()),
            Tool::Rectangle | Tool::Ellipse | Tool::Line => self.start_shape(x, y),
        }
    }

    /// Pointer dragged to (x, y) while pressed.
    pub fn drag(&mut self, x: i32, y: i32) -> Result<(), EditError> {
        match self.tool {
            Tool::Select => {
                if let Some((anchor, additive)) = self.select_anchor {
                    self.select_rect(anchor, (x, y), additive);
                }
                Ok(())
            }
            Tool::Pencil => self.paint(x, y),
            Tool::Eraser => self.erase(x, y),
            Tool::Fill => Ok(()),
            Tool::Rectangle | Tool::Ellipse | Tool::Line => self.update_shape(x, y).map(|_| ()),
        }
    }

    /// Pointer released at (x, y).
    pub fn release(&mut self, x: i32, y: i32) -> Result<(), EditError> {
        match self.tool {
            Tool::Select => {
                self.select_anchor = None;
                Ok(())
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Line => self.finish_shape(x, y).map(|_| ()),
            Tool::Pencil | Tool::Eraser | Tool::Fill => Ok(()),
        }
    }

    // History

    /// Restore the state before the most recent operation.
    ///
    /// Returns the label of the undone operation.
    pub fn undo(&mut self) -> Result<String, EditError> {
        let snapshot = self.history.undo().ok_or(EditError::NothingToUndo)?;
        self.grid = snapshot.grid;
        self.layers.restore(snapshot.layers);
        let (width, height) = (self.width(), self.height());
        self.selection.retain_in_bounds(width, height);
        self.session.cancel();
        info!(label = %snapshot.label, "undid operation");
        Ok(snapshot.label)
    }

    // Documents

    pub fn to_document(&self) -> DesignDocument {
        DesignDocument::from_chart(self)
    }

    /// Replace the chart's contents with a saved design.
    ///
    /// The document is validated first; on error the chart is untouched.
    /// A successful load can be undone.
    pub fn load_document(&mut self, document: DesignDocument) -> Result<(), DocumentError> {
        document.validate(self.min_size)?;
        let (grid, layers, colors) = document.into_parts();

        self.history.capture("Load design", &self.grid, &self.layers);
        self.grid = grid;
        self.layers.restore(layers);
        if !colors.is_empty() {
            self.palette.replace_colors(colors);
        }
        self.selection.clear();
        self.session.cancel();
        self.select_anchor = None;
        info!(width = self.width(), height = self.height(), layers = self.layers.len(), "loaded design");
        Ok(())
    }
}
