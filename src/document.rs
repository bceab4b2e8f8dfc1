//! Saved designs as JSON documents
//!
//! ```json
//! {
//!   "gridWidth": 20,
//!   "gridHeight": 20,
//!   "layers": [{"id": 1, "name": "Background", "visible": true, "opacity": 100,
//!               "offsetX": 0, "offsetY": 0, "cells": {"3,4": "#FF0000"}}],
//!   "colors": ["#000000", "#FF0000"],
//!   "activeLayerId": 1
//! }
//! ```
//!
//! `gridWidth`, `gridHeight` and `layers` are required. `gridData` carries the
//! dense grid of charts without layers as rows of colors or `null`.

use crate::chart::{Chart, MAX_SIZE};
use crate::color::Color;
use crate::grid::DenseGrid;
use crate::layer::{Layer, LayerId, MAX_CELL_COORD, MAX_OFFSET};
use crate::layer_stack::LayerStack;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Why a design could not be read or loaded
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read design: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("design is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid grid dimensions {width}x{height} (minimum {min}x{min})")]
    InvalidDimensions { width: u32, height: u32, min: u32 },
    #[error("grid dimensions {width}x{height} too large (maximum {max}x{max})")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },
    #[error("layer {id} offset ({x}, {y}) out of range (maximum {max})", max = MAX_OFFSET)]
    OffsetOutOfRange { id: LayerId, x: i32, y: i32 },
    #[error("layer {id} cell ({x}, {y}) out of range (maximum {max})", max = MAX_CELL_COORD)]
    CellOutOfRange { id: LayerId, x: i32, y: i32 },
    #[error("duplicate layer id {0}")]
    DuplicateLayerId(LayerId),
    #[error("layer {id} has opacity {opacity}, expected 0-100")]
    InvalidOpacity { id: LayerId, opacity: u8 },
}

/// A complete saved design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Bottom layer first
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_layer_id: Option<LayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_data: Option<Vec<Vec<Option<Color>>>>,
}

/// Wire shape with every required field optional, so a missing one is
/// reported by name rather than as a generic parse error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    grid_width: Option<u32>,
    grid_height: Option<u32>,
    layers: Option<Vec<Layer>>,
    #[serde(default)]
    colors: Vec<Color>,
    #[serde(default)]
    active_layer_id: Option<LayerId>,
    #[serde(default)]
    grid_data: Option<Vec<Vec<Option<Color>>>>,
}

impl DesignDocument {
    /// Snapshot a chart's contents.
    pub fn from_chart(chart: &Chart) -> Self {
        let grid = chart.grid();
        let grid_data = grid.painted().next().map(|_| grid.rows());
        Self {
            grid_width: chart.width(),
            grid_height: chart.height(),
            layers: chart.layers().layers().to_vec(),
            colors: chart.palette().colors().to_vec(),
            active_layer_id: chart.active_layer_id(),
            grid_data,
        }
    }

    /// Parse a design, checking that the required fields are present.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(Self {
            grid_width: raw.grid_width.ok_or(DocumentError::MissingField("gridWidth"))?,
            grid_height: raw.grid_height.ok_or(DocumentError::MissingField("gridHeight"))?,
            layers: raw.layers.ok_or(DocumentError::MissingField("layers"))?,
            colors: raw.colors,
            active_layer_id: raw.active_layer_id,
            grid_data: raw.grid_data,
        })
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, self.to_json()? + "\n")?;
        Ok(())
    }

    /// Check the design can be loaded into a chart with the given minimum size.
    pub fn validate(&self, min_size: u32) -> Result<(), DocumentError> {
        if self.grid_width < min_size || self.grid_height < min_size {
            return Err(DocumentError::InvalidDimensions {
                width: self.grid_width,
                height: self.grid_height,
                min: min_size,
            });
        }
        if self.grid_width > MAX_SIZE || self.grid_height > MAX_SIZE {
            return Err(DocumentError::DimensionsTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_SIZE,
            });
        }
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id) {
                return Err(DocumentError::DuplicateLayerId(layer.id));
            }
            if layer.offset_x.abs() > MAX_OFFSET || layer.offset_y.abs() > MAX_OFFSET {
                return Err(DocumentError::OffsetOutOfRange { id: layer.id, x: layer.offset_x, y: layer.offset_y });
            }
            let out_of_range = |v: i32| v < -MAX_CELL_COORD || v > MAX_CELL_COORD;
            if let Some(((x, y), _)) = layer.cells().find(|&((x, y), _)| out_of_range(x) || out_of_range(y)) {
                return Err(DocumentError::CellOutOfRange { id: layer.id, x, y });
            }
            if layer.opacity > 100 {
                return Err(DocumentError::InvalidOpacity { id: layer.id, opacity: layer.opacity });
            }
        }
        Ok(())
    }

    /// Split into the grid, the layer stack and the palette colors.
    pub fn into_parts(self) -> (DenseGrid, LayerStack, Vec<Color>) {
        let grid = match &self.grid_data {
            Some(rows) => DenseGrid::from_rows(self.grid_width, self.grid_height, rows),
            None => DenseGrid::new(self.grid_width, self.grid_height),
        };
        let layers = LayerStack::from_layers(self.layers, self.active_layer_id);
        (grid, layers, self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;

    const DESIGN: &str = r##"{
        "gridWidth": 8,
        "gridHeight": 6,
        "layers": [
            {"id": 1, "name": "Background", "visible": true, "opacity": 100,
             "offsetX": 0, "offsetY": 0, "cells": {"1,2": "#FF0000"}},
            {"id": 4, "name": "Detail", "opacity": 50, "offsetX": 2, "offsetY": 1,
             "cells": {"0,0": "#0000FF", "3,3": null}}
        ],
        "colors": ["#FF0000", "#0000FF"],
        "activeLayerId": 1
    }"##;

    #[test]
    fn test_parse_design() {
        let document = DesignDocument::from_json(DESIGN).unwrap();
        assert_eq!((document.grid_width, document.grid_height), (8, 6));
        assert_eq!(document.layers.len(), 2);
        let detail = &document.layers[1];
        assert!(detail.visible);
        assert_eq!(detail.len(), 1);
        assert_eq!(detail.get_world_cell(2, 1), Some(&Color::new("#0000FF")));
        assert_eq!(document.active_layer_id, Some(LayerId(1)));
        document.validate(5).unwrap();
    }

    #[test]
    fn test_missing_fields_are_named() {
        let err = DesignDocument::from_json(r#"{"gridWidth": 8, "layers": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("gridHeight")));
        let err = DesignDocument::from_json(r#"{"gridWidth": 8, "gridHeight": 8}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("layers")));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(DesignDocument::from_json("{"), Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_validate_rejects_bad_layers() {
        let mut document = DesignDocument::from_json(DESIGN).unwrap();
        document.layers[1].id = LayerId(1);
        assert!(matches!(document.validate(5), Err(DocumentError::DuplicateLayerId(LayerId(1)))));

        let mut document = DesignDocument::from_json(DESIGN).unwrap();
        document.layers[0].opacity = 120;
        assert!(matches!(document.validate(5), Err(DocumentError::InvalidOpacity { opacity: 120, .. })));

        let document = DesignDocument::from_json(DESIGN).unwrap();
        assert!(matches!(document.validate(7), Err(DocumentError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_validate_rejects_huge_grid() {
        let document =
            DesignDocument::from_json(r#"{"gridWidth": 4000000000, "gridHeight": 4000000000, "layers": []}"#).unwrap();
        assert!(matches!(document.validate(5), Err(DocumentError::DimensionsTooLarge { max: MAX_SIZE, .. })));

        let mut chart = Chart::new(10, 10).unwrap();
        assert!(matches!(chart.load_document(document), Err(DocumentError::DimensionsTooLarge { .. })));
        assert_eq!(chart.width(), 10);
        assert!(chart.history().is_empty());
    }

    #[test]
    fn test_validate_rejects_extreme_offsets_and_cells() {
        let far_offset = r#"{"gridWidth": 8, "gridHeight": 8, "layers": [
            {"id": 1, "name": "L", "offsetX": 2147483647, "offsetY": 0, "cells": {"1,0": "red"}}]}"#;
        let document = DesignDocument::from_json(far_offset).unwrap();
        assert!(matches!(document.validate(5), Err(DocumentError::OffsetOutOfRange { x: i32::MAX, .. })));
        let mut chart = Chart::new(10, 10).unwrap();
        assert!(chart.load_document(document).is_err());
        assert!(chart.visible_layer_cells()[0].1.is_empty());

        let far_cell = r#"{"gridWidth": 8, "gridHeight": 8, "layers": [
            {"id": 1, "name": "L", "cells": {"-2147483648,0": "red"}}]}"#;
        let document = DesignDocument::from_json(far_cell).unwrap();
        assert!(matches!(document.validate(5), Err(DocumentError::CellOutOfRange { x: i32::MIN, y: 0, .. })));
    }

    #[test]
    fn test_failed_load_leaves_chart_untouched() {
        let mut chart = Chart::new(10, 10).unwrap();
        chart.paint(0, 0).unwrap();
        let mut document = DesignDocument::from_json(DESIGN).unwrap();
        document.grid_width = 2;
        assert!(chart.load_document(document).is_err());
        assert_eq!(chart.width(), 10);
        assert!(chart.cell(0, 0).is_some());
        assert_eq!(chart.history().len(), 1);
    }

    #[test]
    fn test_load_restores_active_layer_and_palette() {
        let mut chart = Chart::new(10, 10).unwrap();
        chart.load_document(DesignDocument::from_json(DESIGN).unwrap()).unwrap();
        assert_eq!(chart.active_layer_id(), Some(LayerId(1)));
        assert_eq!(chart.palette().colors().len(), 2);
        assert_eq!(chart.cell(1, 2), Some(&Color::new("#FF0000")));

        // New layers continue after the highest loaded id
        let id = chart.add_layer(None);
        assert_eq!(id, LayerId(5));
    }

    #[test]
    fn test_flat_chart_round_trips_grid_data() {
        let mut chart = Chart::flat(6, 6).unwrap();
        chart.paint(5, 5).unwrap();
        let json = chart.to_document().to_json().unwrap();
        assert!(json.contains("gridData"));

        let mut loaded = Chart::new(10, 10).unwrap();
        loaded.load_document(DesignDocument::from_json(&json).unwrap()).unwrap();
        assert!(!loaded.is_layered());
        assert_eq!(loaded.grid().get(5, 5), Some(&Color::new("#000000")));
        assert_eq!(loaded.delete_layer().unwrap_err(), EditError::NoLayers);
    }

    #[test]
    fn test_empty_grid_omits_grid_data() {
        let chart = Chart::new(6, 6).unwrap();
        let json = chart.to_document().to_json().unwrap();
        assert!(!json.contains("gridData"));
        assert!(json.contains("\"activeLayerId\": 1"));
    }
}
