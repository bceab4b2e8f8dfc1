//! Knitchart - editing engine for layered knitting and pixel charts
//!
//! This library provides functionality to:
//! - Edit a fixed-size chart made of a dense grid and a stack of sparse layers
//! - Flood fill, draw lines, rectangles and ellipses, and mirror symmetrically
//! - Undo any edit from a bounded history of snapshots
//! - Save designs as JSON, export PNG images and preview charts in a terminal
//!
//! [`chart::Chart`] is the entry point; every edit goes through it.

pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod draw;
pub mod error;
pub mod export;
pub mod fill;
pub mod grid;
pub mod layer;
pub mod layer_stack;
pub mod logging;
pub mod mirror;
pub mod palette;
pub mod selection;
pub mod shapes;
pub mod target;
pub mod terminal;
pub mod tools;
pub mod undo;
