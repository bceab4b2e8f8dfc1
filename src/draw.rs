//! Shape drag sessions: `Idle -> start -> Drawing -> finish/cancel -> Idle`
//!
//! A session records the anchor of a drag and recomputes the shape's cell set
//! as the pointer moves. It never touches the chart itself; the caller commits
//! the cells returned by [`ShapeSession::finish`].

use crate::error::EditError;
use crate::shapes::{rasterize_shape, ShapeKind};
use std::collections::HashSet;

/// State of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
struct Drawing {
    kind: ShapeKind,
    anchor: (i32, i32),
    filled: bool,
    preview: HashSet<(i32, i32)>,
}

/// Transient shape-drawing state. Not part of undo history or saved designs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeSession {
    drawing: Option<Drawing>,
}

impl ShapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drawing.is_some()
    }

    pub fn kind(&self) -> Option<ShapeKind> {
        self.drawing.as_ref().map(|d| d.kind)
    }

    pub fn anchor(&self) -> Option<(i32, i32)> {
        self.drawing.as_ref().map(|d| d.anchor)
    }

    /// Begin a drag at `anchor`, replacing any previous session and preview.
    pub fn start(&mut self, kind: ShapeKind, anchor: (i32, i32), filled: bool) {
        self.drawing = Some(Drawing { kind, anchor, filled, preview: HashSet::new() });
    }

    /// Recompute the preview for the pointer at `point`.
    pub fn update_preview(&mut self, point: (i32, i32)) -> Result<&HashSet<(i32, i32)>, EditError> {
        let drawing = self.drawing.as_mut().ok_or(EditError::NoShapeInProgress)?;
        drawing.preview = rasterize_shape(drawing.kind, drawing.anchor, point, drawing.filled);
        Ok(&drawing.preview)
    }

    /// Cells of the current preview; empty when idle or before the first update.
    pub fn preview(&self) -> Option<&HashSet<(i32, i32)>> {
        self.drawing.as_ref().map(|d| &d.preview)
    }

    /// End the drag at `point` and hand back the cells to commit.
    pub fn finish(&mut self, point: (i32, i32)) -> Result<(ShapeKind, HashSet<(i32, i32)>), EditError> {
        self.update_preview(point)?;
        match self.drawing.take() {
            Some(drawing) => Ok((drawing.kind, drawing.preview)),
            None => Err(EditError::NoShapeInProgress),
        }
    }

    /// Abandon the drag without producing any cells.
    pub fn cancel(&mut self) {
        self.drawing = None;
    }
}
