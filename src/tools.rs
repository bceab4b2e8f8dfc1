//! Editing tools selectable by the user

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Rectangle and click selection
    #[default]
    Select,
    /// Paint single cells with the current color
    Pencil,
    /// Erase single cells
    Eraser,
    Rectangle,
    #[serde(alias = "circle")]
    Ellipse,
    Line,
    /// Flood fill
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 7] =
        [Tool::Select, Tool::Pencil, Tool::Eraser, Tool::Rectangle, Tool::Ellipse, Tool::Line, Tool::Fill];

    /// Parse a tool name; `circle` is accepted for the ellipse tool
    pub fn from_str(s: &str) -> Option<Tool> {
        match s.to_lowercase().as_str() {
            "select" => Some(Tool::Select),
            "pencil" => Some(Tool::Pencil),
            "eraser" => Some(Tool::Eraser),
            "rectangle" | "rect" => Some(Tool::Rectangle),
            "ellipse" | "circle" => Some(Tool::Ellipse),
            "line" => Some(Tool::Line),
            "fill" => Some(Tool::Fill),
            _ => None,
        }
    }

    /// The shape this tool drags out, if it is a shape tool
    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Ellipse => Some(ShapeKind::Ellipse),
            Tool::Line => Some(ShapeKind::Line),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Select => "select",
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Ellipse => "ellipse",
            Tool::Line => "line",
            Tool::Fill => "fill",
        };
        f.write_str(name)
    }
}
