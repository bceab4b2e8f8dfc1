//! Symmetry mirroring from the top-left source quadrant
//!
//! With any axis enabled, the only editable region is the *primary quadrant*
//! `x < cx && y < cy`, where `(cx, cy) = (W/2, H/2)` rounded down. Applying
//! the mirror recomputes everything else from that quadrant, so repeated
//! applications never drift.

use crate::color::Color;
use crate::target::CellAccess;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Which mirror axes are enabled and whether edits re-apply them automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorConfig {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
    pub live_update: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self { horizontal: false, vertical: false, diagonal: false, live_update: true }
    }
}

impl MirrorConfig {
    pub fn is_enabled(&self, axis: MirrorAxis) -> bool {
        match axis {
            MirrorAxis::Horizontal => self.horizontal,
            MirrorAxis::Vertical => self.vertical,
            MirrorAxis::Diagonal => self.diagonal,
        }
    }
}

/// A mirror axis that can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorAxis {
    Horizontal,
    Vertical,
    Diagonal,
}

impl MirrorAxis {
    /// Parse an axis name or its first letter
    pub fn from_str(s: &str) -> Option<MirrorAxis> {
        match s.to_lowercase().as_str() {
            "h" | "horizontal" => Some(MirrorAxis::Horizontal),
            "v" | "vertical" => Some(MirrorAxis::Vertical),
            "d" | "diagonal" => Some(MirrorAxis::Diagonal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MirrorEngine {
    config: MirrorConfig,
}

impl MirrorEngine {
    pub fn new(config: MirrorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MirrorConfig {
        self.config
    }

    /// Whether any axis is enabled.
    pub fn is_active(&self) -> bool {
        self.config.horizontal || self.config.vertical || self.config.diagonal
    }

    pub fn live_update(&self) -> bool {
        self.config.live_update
    }

    pub fn set_live_update(&mut self, live: bool) {
        self.config.live_update = live;
    }

    /// Flip one axis and return its new state.
    ///
    /// Turning an axis off leaves already mirrored cells in place.
    pub fn toggle(&mut self, axis: MirrorAxis) -> bool {
        let flag = match axis {
            MirrorAxis::Horizontal => &mut self.config.horizontal,
            MirrorAxis::Vertical => &mut self.config.vertical,
            MirrorAxis::Diagonal => &mut self.config.diagonal,
        };
        *flag = !*flag;
        *flag
    }

    /// Center of the grid in whole cells
    pub fn center(width: u32, height: u32) -> (i32, i32) {
        ((width / 2) as i32, (height / 2) as i32)
    }

    /// Whether a world coordinate lies in the editable source quadrant.
    pub fn is_in_primary_quadrant(x: i32, y: i32, width: u32, height: u32) -> bool {
        let (cx, cy) = Self::center(width, height);
        x >= 0 && y >= 0 && x < cx && y < cy
    }

    /// Recompute every mirrored cell of `target` from its primary quadrant.
    ///
    /// Steps: collect the painted primary-quadrant cells, erase the whole
    /// target, write the primary cells back, then write their reflections.
    /// Reflections outside the `width`×`height` grid are dropped.
    ///
    /// The diagonal axis maps the primary quadrant onto itself. Each pair of
    /// transposed cells ends up with one shared color: the color of the cell
    /// on or above the diagonal (`x - cx >= y - cy`) when that one is painted,
    /// otherwise the other cell's color.
    ///
    /// Horizontal and vertical reflections are composed with the diagonal:
    /// they reflect the diagonal-resolved quadrant, not just the painted cells.
    ///
    /// Does nothing when no axis is enabled.
    pub fn apply<A: CellAccess + ?Sized>(&self, target: &mut A, width: u32, height: u32) {
        if !self.is_active() {
            return;
        }
        let (cx, cy) = Self::center(width, height);

        // Primary cells in world coordinates, ordered for determinism
        let mut source: BTreeMap<(i32, i32), Color> = BTreeMap::new();
        for ((x, y), color) in target.painted() {
            let (wx, wy) = target.to_world(x, y);
            if Self::is_in_primary_quadrant(wx, wy, width, height) {
                source.insert((wx, wy), color);
            }
        }

        let primary = if self.config.diagonal {
            Self::resolve_diagonal(&source, cx, cy, width, height)
        } else {
            source
        };

        target.clear();

        for (&pos, color) in &primary {
            write_world(target, pos, color, width, height);
        }

        let mut reflected = 0usize;
        for (&(x, y), color) in &primary {
            let mx = 2 * cx - x - 1;
            let my = 2 * cy - y - 1;
            if self.config.horizontal {
                reflected += write_world(target, (mx, y), color, width, height) as usize;
            }
            if self.config.vertical {
                reflected += write_world(target, (x, my), color, width, height) as usize;
            }
            if self.config.horizontal && self.config.vertical {
                reflected += write_world(target, (mx, my), color, width, height) as usize;
            }
        }

        debug!(
            primary = primary.len(),
            reflected,
            horizontal = self.config.horizontal,
            vertical = self.config.vertical,
            diagonal = self.config.diagonal,
            "applied mirror"
        );
    }

    /// Make the primary quadrant symmetric about its diagonal.
    fn resolve_diagonal(
        source: &BTreeMap<(i32, i32), Color>,
        cx: i32,
        cy: i32,
        width: u32,
        height: u32,
    ) -> BTreeMap<(i32, i32), Color> {
        let transpose = |(x, y): (i32, i32)| (cx + (y - cy), cy + (x - cx));
        let leads = |(x, y): (i32, i32)| x - cx >= y - cy;

        let mut resolved = BTreeMap::new();
        for &pos in source.keys() {
            let partner = transpose(pos);
            let (lead, follow) = if leads(pos) { (pos, partner) } else { (partner, pos) };
            let color = source.get(&lead).or_else(|| source.get(&follow));
            if let Some(color) = color {
                for p in [pos, partner] {
                    if in_grid(p, width, height) {
                        resolved.insert(p, color.clone());
                    }
                }
            }
        }
        resolved
    }
}

fn in_grid((x, y): (i32, i32), width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

/// Paint a world cell through the target's frame; false when off the grid.
fn write_world<A: CellAccess + ?Sized>(
    target: &mut A,
    pos: (i32, i32),
    color: &Color,
    width: u32,
    height: u32,
) -> bool {
    if !in_grid(pos, width, height) {
        return false;
    }
    let (x, y) = target.from_world(pos.0, pos.1);
    target.set(x, y, Some(color.clone()));
    true
}
