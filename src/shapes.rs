//! Shape rasterization for chart cells.
//!
//! Converts a drag gesture (anchor point, current point) into the set of
//! integer cell coordinates a shape covers. Every function is pure: the
//! result depends only on its arguments, and nothing is clipped here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Slack applied to the normalized ellipse equation so boundary cells that
/// round just outside the exact curve are still included.
pub const ELLIPSE_EPSILON: f64 = 0.5;

/// Shapes that can be dragged out on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rectangle,
    #[serde(alias = "circle")]
    Ellipse,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Line => f.write_str("line"),
            ShapeKind::Rectangle => f.write_str("rectangle"),
            ShapeKind::Ellipse => f.write_str("ellipse"),
        }
    }
}

/// Rasterize any shape kind between two corner points.
///
/// `filled` has no effect on lines.
pub fn rasterize_shape(
    kind: ShapeKind,
    anchor: (i32, i32),
    end: (i32, i32),
    filled: bool,
) -> HashSet<(i32, i32)> {
    match kind {
        ShapeKind::Line => rasterize_line(anchor, end),
        ShapeKind::Rectangle => rasterize_rectangle(anchor, end, filled),
        ShapeKind::Ellipse => rasterize_ellipse(anchor, end, filled),
    }
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// Both endpoints are included. The endpoints are put in a canonical order
/// first, so swapping them yields the same cells.
///
/// # Examples
///
/// ```
/// use knitchart::shapes::rasterize_line;
///
/// let pixels = rasterize_line((0, 0), (3, 3));
/// assert_eq!(pixels.len(), 4);
/// assert_eq!(pixels, rasterize_line((3, 3), (0, 0)));
/// ```
pub fn rasterize_line(p0: (i32, i32), p1: (i32, i32)) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    let (start, end) = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
    let (mut x0, mut y0) = start;
    let (x1, y1) = end;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        pixels.insert((x0, y0));

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }

    pixels
}

/// Normalize two corners into (left, top, right, bottom).
fn bounding_box(a: (i32, i32), b: (i32, i32)) -> (i32, i32, i32, i32) {
    (a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
}

/// Rasterize the rectangle spanned by two opposite corners.
///
/// Filled rectangles cover the whole box; outlines cover its four edges.
///
/// # Examples
///
/// ```
/// use knitchart::shapes::rasterize_rectangle;
///
/// assert_eq!(rasterize_rectangle((2, 1), (0, 0), true).len(), 6);
/// let outline = rasterize_rectangle((0, 0), (3, 3), false);
/// assert!(outline.contains(&(3, 0)));
/// assert!(!outline.contains(&(1, 1)));
/// ```
pub fn rasterize_rectangle(a: (i32, i32), b: (i32, i32), filled: bool) -> HashSet<(i32, i32)> {
    let (left, top, right, bottom) = bounding_box(a, b);
    let mut pixels = HashSet::new();

    if filled {
        for y in top..=bottom {
            for x in left..=right {
                pixels.insert((x, y));
            }
        }
        return pixels;
    }

    // Top and bottom edges
    for x in left..=right {
        pixels.insert((x, top));
        pixels.insert((x, bottom));
    }

    // Left and right edges
    for y in top..=bottom {
        pixels.insert((left, y));
        pixels.insert((right, y));
    }

    pixels
}

/// Rasterize the ellipse inscribed in the box spanned by two opposite corners.
///
/// The center is the box midpoint and the radii are half the box width and
/// height. A cell belongs to a filled ellipse when
/// `((x-cx)/rx)^2 + ((y-cy)/ry)^2 <= 1 + ELLIPSE_EPSILON`, and to an outline
/// when that sum is within `ELLIPSE_EPSILON` of 1. A box with zero width or
/// height has no cells.
///
/// # Examples
///
/// ```
/// use knitchart::shapes::rasterize_ellipse;
///
/// let pixels = rasterize_ellipse((0, 0), (6, 4), true);
/// assert!(pixels.contains(&(3, 2))); // Center
/// assert!(rasterize_ellipse((0, 0), (0, 4), true).is_empty());
/// ```
pub fn rasterize_ellipse(a: (i32, i32), b: (i32, i32), filled: bool) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    let cx = (a.0 as f64 + b.0 as f64) / 2.0;
    let cy = (a.1 as f64 + b.1 as f64) / 2.0;
    let rx = (b.0 as f64 - a.0 as f64).abs() / 2.0;
    let ry = (b.1 as f64 - a.1 as f64).abs() / 2.0;

    if rx <= 0.0 || ry <= 0.0 {
        return pixels;
    }

    // Scan one cell past the box; the epsilon can reach slightly outside it
    let left = (cx - rx - 1.0).floor() as i32;
    let right = (cx + rx + 1.0).ceil() as i32;
    let top = (cy - ry - 1.0).floor() as i32;
    let bottom = (cy + ry + 1.0).ceil() as i32;

    for y in top..=bottom {
        for x in left..=right {
            let nx = (x as f64 - cx) / rx;
            let ny = (y as f64 - cy) / ry;
            let d = nx * nx + ny * ny;
            let inside = if filled {
                d <= 1.0 + ELLIPSE_EPSILON
            } else {
                (d - 1.0).abs() <= ELLIPSE_EPSILON
            };
            if inside {
                pixels.insert((x, y));
            }
        }
    }

    pixels
}
