//! Flood fill over any [`CellAccess`] target

use crate::color::Color;
use crate::target::CellAccess;
use std::collections::VecDeque;
use tracing::trace;

/// Recolor the 4-connected region of same-colored cells around (x, y).
///
/// The region is every cell reachable through N/E/S/W steps whose color
/// equals the start cell's color exactly (empty matches empty). Traversal
/// stays inside `access.contains`. Each cell in the region is written once.
///
/// Returns the number of cells written; zero when the start cell is outside
/// the target or already has `color`.
pub fn flood_fill<A: CellAccess + ?Sized>(access: &mut A, x: i32, y: i32, color: Option<Color>) -> usize {
    if !access.contains(x, y) {
        return 0;
    }

    let original = access.get(x, y).cloned();

    // Filling with the same color is a no-op
    if original == color {
        return 0;
    }

    // Iterative BFS. Cells are recolored when queued, so a queued cell no
    // longer matches `original` and cannot be queued twice.
    let mut queue = VecDeque::new();
    access.set(x, y, color.clone());
    queue.push_back((x, y));
    let mut filled = 1;

    while let Some((cx, cy)) = queue.pop_front() {
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let (nx, ny) = (cx + dx, cy + dy);
            if access.contains(nx, ny) && access.get(nx, ny) == original.as_ref() {
                access.set(nx, ny, color.clone());
                queue.push_back((nx, ny));
                filled += 1;
            }
        }
    }

    trace!(x, y, filled, "flood fill");
    filled
}
