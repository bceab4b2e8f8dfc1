//! Layers: sparse cell stores positioned over the chart grid
//!
//! A layer stores paint in its own *local* coordinate frame. Its offset places
//! that frame over the grid's *world* frame. All conversions between the two
//! go through [`Layer::world_to_local`] and [`Layer::local_to_world`].
//!
//! A layer knows nothing about the grid size; bounds are checked by the caller.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique layer identifier, assigned in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest distance a layer may be offset from the grid origin on either axis
pub const MAX_OFFSET: i32 = 1 << 24;

/// Largest local cell coordinate accepted from a saved design on either axis
pub const MAX_CELL_COORD: i32 = 1 << 26;

/// A named, positioned, sparse layer of painted cells.
///
/// Invariant: `cells` never holds an empty entry. An absent key is an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Opacity percentage, 0-100
    #[serde(default = "default_opacity")]
    pub opacity: u8,
    #[serde(default)]
    pub offset_x: i32,
    #[serde(default)]
    pub offset_y: i32,
    #[serde(default, with = "cell_keys")]
    cells: HashMap<(i32, i32), Color>,
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> u8 {
    100
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            opacity: 100,
            offset_x: 0,
            offset_y: 0,
            cells: HashMap::new(),
        }
    }

    /// Color at a local coordinate, `None` when the cell is empty.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Color> {
        self.cells.get(&(x, y))
    }

    /// Paint or erase a local cell. Passing `None` removes the entry.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Option<Color>) {
        match color {
            Some(color) => {
                self.cells.insert((x, y), color);
            }
            None => {
                self.cells.remove(&(x, y));
            }
        }
    }

    pub fn clear_cells(&mut self) {
        self.cells.clear();
    }

    /// Number of painted cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn world_to_local(&self, wx: i32, wy: i32) -> (i32, i32) {
        (wx.saturating_sub(self.offset_x), wy.saturating_sub(self.offset_y))
    }

    pub fn local_to_world(&self, lx: i32, ly: i32) -> (i32, i32) {
        (lx.saturating_add(self.offset_x), ly.saturating_add(self.offset_y))
    }

    /// Painted cells in local coordinates, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = ((i32, i32), &Color)> + '_ {
        self.cells.iter().map(|(&pos, color)| (pos, color))
    }

    /// Painted cells in world coordinates, in no particular order.
    ///
    /// Cells positioned outside the grid are included; renderers clip them.
    pub fn world_cells(&self) -> impl Iterator<Item = ((i32, i32), &Color)> + '_ {
        self.cells.iter().map(|(&(lx, ly), color)| (self.local_to_world(lx, ly), color))
    }

    /// Color at a world coordinate.
    pub fn get_world_cell(&self, wx: i32, wy: i32) -> Option<&Color> {
        let (lx, ly) = self.world_to_local(wx, wy);
        self.get_cell(lx, ly)
    }

    /// Paint or erase the cell under a world coordinate.
    pub fn set_world_cell(&mut self, wx: i32, wy: i32, color: Option<Color>) {
        let (lx, ly) = self.world_to_local(wx, wy);
        self.set_cell(lx, ly, color);
    }

    /// Shift the layer over the grid without touching its cells.
    ///
    /// Offsets are clamped to `±MAX_OFFSET`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.offset_x = self.offset_x.saturating_add(dx).clamp(-MAX_OFFSET, MAX_OFFSET);
        self.offset_y = self.offset_y.saturating_add(dy).clamp(-MAX_OFFSET, MAX_OFFSET);
    }
}

/// Serialize the cell map as `{"x,y": color}` objects.
mod cell_keys {
    use crate::color::Color;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, HashMap};

    pub fn serialize<S>(cells: &HashMap<(i32, i32), Color>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Sorted by row then column for stable files
        let ordered: BTreeMap<(i32, i32), &Color> =
            cells.iter().map(|(&(x, y), color)| ((y, x), color)).collect();
        let keyed: Vec<(String, &Color)> =
            ordered.into_iter().map(|((y, x), color)| (format!("{},{}", x, y), color)).collect();
        serializer.collect_map(keyed)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<(i32, i32), Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Option<Color>> = HashMap::deserialize(deserializer)?;
        let mut cells = HashMap::with_capacity(raw.len());
        for (key, color) in raw {
            let pos = parse_key(&key)
                .ok_or_else(|| D::Error::custom(format!("invalid cell key '{}', expected \"x,y\"", key)))?;
            // Empty entries are never stored
            if let Some(color) = color {
                cells.insert(pos, color);
            }
        }
        Ok(cells)
    }

    fn parse_key(key: &str) -> Option<(i32, i32)> {
        let (x, y) = key.split_once(',')?;
        Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new("#FF0000")
    }

    #[test]
    fn test_get_missing_cell_is_empty() {
        let layer = Layer::new(LayerId(1), "Background");
        assert_eq!(layer.get_cell(3, 4), None);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_set_empty_removes_entry() {
        let mut layer = Layer::new(LayerId(1), "Background");
        layer.set_cell(1, 1, Some(red()));
        assert_eq!(layer.len(), 1);
        layer.set_cell(1, 1, None);
        assert_eq!(layer.len(), 0);
        assert_eq!(layer.get_cell(1, 1), None);
    }

    #[test]
    fn test_offset_conversion() {
        let mut layer = Layer::new(LayerId(2), "Motif");
        layer.offset_x = 2;
        layer.offset_y = 3;
        layer.set_cell(0, 0, Some(Color::new("green")));

        assert_eq!(layer.local_to_world(0, 0), (2, 3));
        assert_eq!(layer.world_to_local(2, 3), (0, 0));
        assert_eq!(layer.get_world_cell(2, 3), Some(&Color::new("green")));
        assert_eq!(layer.world_cells().collect::<Vec<_>>(), vec![((2, 3), &Color::new("green"))]);
    }

    #[test]
    fn test_translate_moves_cells_in_world() {
        let mut layer = Layer::new(LayerId(1), "L");
        layer.set_world_cell(4, 4, Some(red()));
        layer.translate(-1, 2);
        assert_eq!(layer.get_world_cell(3, 6), Some(&red()));
        assert_eq!(layer.get_cell(4, 4), Some(&red()));
    }

    #[test]
    fn test_translate_clamps_offset() {
        let mut layer = Layer::new(LayerId(1), "L");
        layer.set_cell(1, 0, Some(red()));
        layer.translate(i32::MAX, i32::MIN);
        assert_eq!((layer.offset_x, layer.offset_y), (MAX_OFFSET, -MAX_OFFSET));
        layer.translate(i32::MAX, 0);
        assert_eq!(layer.offset_x, MAX_OFFSET);
        assert_eq!(layer.world_cells().count(), 1);
    }

    #[test]
    fn test_conversion_saturates_at_extremes() {
        let mut layer = Layer::new(LayerId(1), "L");
        layer.offset_x = i32::MAX;
        layer.offset_y = i32::MIN;
        assert_eq!(layer.local_to_world(1, -1), (i32::MAX, i32::MIN));
        assert_eq!(layer.world_to_local(-1, 1), (i32::MIN, i32::MAX));
        assert_eq!(layer.get_world_cell(0, 0), None);
    }

    #[test]
    fn test_serde_cells_use_string_keys() {
        let mut layer = Layer::new(LayerId(7), "Fair isle");
        layer.offset_x = -1;
        layer.set_cell(2, 0, Some(red()));
        layer.set_cell(0, 1, Some(Color::new("#00FF00")));

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["offsetX"], -1);
        assert_eq!(json["cells"]["2,0"], "#FF0000");
        assert_eq!(json["cells"]["0,1"], "#00FF00");

        let back: Layer = serde_json::from_value(json).unwrap();
        assert_eq!(back, layer);
    }

    #[test]
    fn test_deserialize_drops_null_cells_and_defaults_fields() {
        let layer: Layer = serde_json::from_str(
            r##"{"id": 3, "name": "x", "cells": {"1,1": "#000000", "2,2": null}}"##,
        )
        .unwrap();
        assert!(layer.visible);
        assert_eq!(layer.opacity, 100);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_bad_key() {
        let result: Result<Layer, _> =
            serde_json::from_str(r##"{"id": 3, "name": "x", "cells": {"a,b": "#000000"}}"##);
        assert!(result.is_err());
    }
}
