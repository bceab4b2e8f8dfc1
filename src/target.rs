//! Uniform cell access over the two edit targets
//!
//! Edits land either in the active layer (local coordinates) or, for charts
//! without layers, in the dense grid (world coordinates). Algorithms such as
//! flood fill and mirroring work through [`CellAccess`] and never need to know
//! which one they were given.

use crate::color::Color;
use crate::grid::DenseGrid;
use crate::layer::Layer;

/// Read/write access to a bounded set of cells.
///
/// Coordinates are in the target's own frame. `to_world`/`from_world` map
/// that frame onto the grid.
pub trait CellAccess {
    /// Whether (x, y) lies inside the editable area.
    fn contains(&self, x: i32, y: i32) -> bool;

    fn get(&self, x: i32, y: i32) -> Option<&Color>;

    fn set(&mut self, x: i32, y: i32, color: Option<Color>);

    /// Every painted cell, including any outside the editable area.
    fn painted(&self) -> Vec<((i32, i32), Color)>;

    /// Erase every cell.
    fn clear(&mut self);

    fn to_world(&self, x: i32, y: i32) -> (i32, i32) {
        (x, y)
    }

    fn from_world(&self, wx: i32, wy: i32) -> (i32, i32) {
        (wx, wy)
    }
}

impl CellAccess for DenseGrid {
    fn contains(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y)
    }

    fn get(&self, x: i32, y: i32) -> Option<&Color> {
        DenseGrid::get(self, x, y)
    }

    fn set(&mut self, x: i32, y: i32, color: Option<Color>) {
        DenseGrid::set(self, x, y, color)
    }

    fn painted(&self) -> Vec<((i32, i32), Color)> {
        DenseGrid::painted(self).map(|(pos, c)| (pos, c.clone())).collect()
    }

    fn clear(&mut self) {
        DenseGrid::clear(self)
    }
}

/// A layer viewed through the grid window.
///
/// Coordinates are layer-local; a cell is editable when its world position
/// falls inside the `width`×`height` grid.
pub struct LayerCells<'a> {
    layer: &'a mut Layer,
    width: u32,
    height: u32,
}

impl<'a> LayerCells<'a> {
    pub fn new(layer: &'a mut Layer, width: u32, height: u32) -> Self {
        Self { layer, width, height }
    }
}

impl CellAccess for LayerCells<'_> {
    fn contains(&self, x: i32, y: i32) -> bool {
        let (wx, wy) = self.layer.local_to_world(x, y);
        wx >= 0 && wy >= 0 && (wx as u32) < self.width && (wy as u32) < self.height
    }

    fn get(&self, x: i32, y: i32) -> Option<&Color> {
        self.layer.get_cell(x, y)
    }

    fn set(&mut self, x: i32, y: i32, color: Option<Color>) {
        self.layer.set_cell(x, y, color)
    }

    fn painted(&self) -> Vec<((i32, i32), Color)> {
        self.layer.cells().map(|(pos, c)| (pos, c.clone())).collect()
    }

    fn clear(&mut self) {
        self.layer.clear_cells()
    }

    fn to_world(&self, x: i32, y: i32) -> (i32, i32) {
        self.layer.local_to_world(x, y)
    }

    fn from_world(&self, wx: i32, wy: i32) -> (i32, i32) {
        self.layer.world_to_local(wx, wy)
    }
}
