//! Rejections reported by chart edit operations
//!
//! Every variant describes a refused user request. The operation that returns
//! one has not touched the chart, and no undo snapshot was taken for it.

use crate::layer::LayerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Requested grid size is below the configured minimum
    #[error("invalid grid dimensions {width}x{height} (minimum {min}x{min})")]
    InvalidDimensions { width: u32, height: u32, min: u32 },
    /// Requested grid size is above the supported maximum
    #[error("grid dimensions {width}x{height} too large (maximum {max}x{max})")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },
    /// Coordinate lies outside the grid
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: u32, height: u32 },
    /// Mirroring is on and the edit is outside the editable top-left quadrant
    #[error("({x}, {y}) is outside the mirror source quadrant")]
    OutsideMirrorQuadrant { x: i32, y: i32 },
    /// The stack must keep at least one layer
    #[error("cannot delete the only layer")]
    LastLayer,
    /// Merge down needs a layer below the active one
    #[error("no layer below '{0}' to merge into")]
    NoLayerBelow(String),
    /// Layer id does not exist in the stack
    #[error("layer {0} not found")]
    UnknownLayer(LayerId),
    /// Operation needs an active layer but the chart is in flat mode
    #[error("chart has no layers")]
    NoLayers,
    /// Opacity must be a percentage
    #[error("opacity {0} out of range 0-100")]
    InvalidOpacity(u8),
    /// Flood fill start cell already has the fill color
    #[error("fill at ({x}, {y}) is a no-op (already that color)")]
    FillNoop { x: i32, y: i32 },
    /// Shape commit or preview requested while no shape is being drawn
    #[error("no shape is being drawn")]
    NoShapeInProgress,
    /// The current tool does not draw shapes
    #[error("tool '{0}' does not draw shapes")]
    NotAShapeTool(String),
    /// Selection operation with nothing selected
    #[error("nothing is selected")]
    EmptySelection,
    /// Paste with nothing copied
    #[error("clipboard is empty")]
    EmptyClipboard,
    /// Undo with an empty history
    #[error("nothing to undo")]
    NothingToUndo,
    /// Palette already holds the maximum number of colors
    #[error("palette is full (maximum {0} colors)")]
    PaletteFull(usize),
    /// Mirror apply requested with no mirror axis enabled
    #[error("no mirror axis is enabled")]
    MirrorInactive,
}
