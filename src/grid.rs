//! Dense W×H cell storage
//!
//! The dense grid is the edit target for charts without layers and the base
//! image under every layer when flattening.

use crate::color::Color;

/// A row-major grid of optional colors addressed in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<Color>>,
}

impl DenseGrid {
    /// Create an empty grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, cells: vec![None; width as usize * height as usize] }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Color at (x, y); `None` for empty or out-of-range cells.
    pub fn get(&self, x: i32, y: i32) -> Option<&Color> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    /// Paint or erase (x, y). Out-of-range writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Option<Color>) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Change the size, keeping the overlapping region and emptying the rest.
    pub fn resize(&mut self, width: u32, height: u32) {
        let mut resized = DenseGrid::new(width, height);
        for y in 0..height.min(self.height) as i32 {
            for x in 0..width.min(self.width) as i32 {
                resized.set(x, y, self.get(x, y).cloned());
            }
        }
        *self = resized;
    }

    /// Painted cells with their coordinates, row by row.
    pub fn painted(&self) -> impl Iterator<Item = ((i32, i32), &Color)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|c| (((i % width) as i32, (i / width) as i32), c))
        })
    }

    /// Rows as vectors, top row first.
    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.cells.chunks(self.width as usize).map(|row| row.to_vec()).collect()
    }

    /// Build a grid from rows, padding short rows and dropping extra columns.
    pub fn from_rows(width: u32, height: u32, rows: &[Vec<Option<Color>>]) -> Self {
        let mut grid = DenseGrid::new(width, height);
        for (y, row) in rows.iter().enumerate().take(height as usize) {
            for (x, cell) in row.iter().enumerate().take(width as usize) {
                grid.set(x as i32, y as i32, cell.clone());
            }
        }
        grid
    }
}
