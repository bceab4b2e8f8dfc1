//! Cell selection and the copy buffer
//!
//! Selections hold world coordinates and are always kept inside the grid.

use crate::color::Color;
use std::collections::{BTreeMap, HashSet};

/// A set of selected world cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    cells: HashSet<(i32, i32)>,
}

fn in_grid(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cells.contains(&(x, y))
    }

    pub fn cells(&self) -> &HashSet<(i32, i32)> {
        &self.cells
    }

    /// Selected cells in row-major order
    pub fn sorted(&self) -> Vec<(i32, i32)> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_by_key(|&(x, y)| (y, x));
        cells
    }

    /// Select the rectangle spanned by `a` and `b`, clipped to the grid.
    ///
    /// With `additive` the rectangle joins the current selection, otherwise it
    /// replaces it.
    pub fn select_rect(&mut self, a: (i32, i32), b: (i32, i32), additive: bool, width: u32, height: u32) {
        if !additive {
            self.cells.clear();
        }
        for y in a.1.min(b.1)..=a.1.max(b.1) {
            for x in a.0.min(b.0)..=a.0.max(b.0) {
                if in_grid(x, y, width, height) {
                    self.cells.insert((x, y));
                }
            }
        }
    }

    /// Add one cell; returns false when it was already selected or off-grid.
    pub fn add(&mut self, x: i32, y: i32, width: u32, height: u32) -> bool {
        in_grid(x, y, width, height) && self.cells.insert((x, y))
    }

    pub fn select_all(&mut self, width: u32, height: u32) {
        self.cells.clear();
        self.select_rect((0, 0), (width as i32 - 1, height as i32 - 1), true, width, height);
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Replace the selection with `cells`, dropping any outside the grid.
    pub fn replace(&mut self, cells: impl IntoIterator<Item = (i32, i32)>, width: u32, height: u32) {
        self.cells = cells.into_iter().filter(|&(x, y)| in_grid(x, y, width, height)).collect();
    }

    /// Top-left and bottom-right corners of the selection
    pub fn bounds(&self) -> Option<((i32, i32), (i32, i32))> {
        let min_x = self.cells.iter().map(|c| c.0).min()?;
        let min_y = self.cells.iter().map(|c| c.1).min()?;
        let max_x = self.cells.iter().map(|c| c.0).max()?;
        let max_y = self.cells.iter().map(|c| c.1).max()?;
        Some(((min_x, min_y), (max_x, max_y)))
    }

    /// Drop cells that fall outside a (possibly smaller) grid.
    pub fn retain_in_bounds(&mut self, width: u32, height: u32) {
        self.cells.retain(|&(x, y)| in_grid(x, y, width, height));
    }
}

/// Copied cells, positioned relative to the top-left of the copied region.
///
/// Only selected cells are stored, so pasting leaves unselected cells inside
/// the bounding box untouched. Empty selected cells are stored as `None` and
/// erase on paste.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipboard {
    width: u32,
    height: u32,
    cells: BTreeMap<(i32, i32), Option<Color>>,
}

impl Clipboard {
    /// Copy the selected cells using `read` to look up each world cell.
    pub fn copy<'a, F>(selection: &Selection, read: F) -> Option<Self>
    where
        F: Fn(i32, i32) -> Option<&'a Color>,
    {
        let ((min_x, min_y), (max_x, max_y)) = selection.bounds()?;
        let cells = selection
            .cells()
            .iter()
            .map(|&(x, y)| ((x - min_x, y - min_y), read(x, y).cloned()))
            .collect();
        Some(Self { width: (max_x - min_x + 1) as u32, height: (max_y - min_y + 1) as u32, cells })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells translated so the region's top-left lands on `origin`
    pub fn placed_at(&self, origin: (i32, i32)) -> impl Iterator<Item = ((i32, i32), Option<Color>)> + '_ {
        self.cells.iter().map(move |(&(dx, dy), color)| ((origin.0 + dx, origin.1 + dy), color.clone()))
    }
}
