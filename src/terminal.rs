//! Terminal rendering of charts
//!
//! Two views: true-color ANSI blocks of the flattened image, and a plain
//! symbol grid with a legend for terminals (or pipes) without color. Both
//! label rows and columns starting from 1, the way knitting charts are read.

use crate::chart::Chart;
use crate::color::Color;
use image::{Rgba, RgbaImage};
use std::collections::BTreeMap;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Symbol for an unpainted cell in the plain view
pub const EMPTY_SYMBOL: char = '.';

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background
/// to visually distinguish them from opaque colors.
///
/// # Examples
///
/// ```
/// use knitchart::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// let red = color_to_ansi_bg(Rgba([255, 0, 0, 255]));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
///
/// let transparent = color_to_ansi_bg(Rgba([0, 0, 0, 0]));
/// assert_eq!(transparent, "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[48;5;236m".to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

fn column_header(width: u32) -> String {
    let mut header = String::from("    ");
    for x in 1..=width {
        header.push_str(&format!("{:>3}", x));
    }
    header.push('\n');
    header
}

/// Render a flattened chart image as colored 3-character cells with rulers.
pub fn render_ansi(image: &RgbaImage) -> String {
    let (width, height) = image.dimensions();
    let mut output = column_header(width);
    for y in 0..height {
        output.push_str(&format!("{:>3} ", y + 1));
        for x in 0..width {
            output.push_str(&color_to_ansi_bg(*image.get_pixel(x, y)));
            output.push_str("   ");
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }
    output
}

/// The color shown at a world cell: the top visible painted layer, falling
/// back to the dense grid. Opacity is ignored.
pub fn top_color(chart: &Chart, x: i32, y: i32) -> Option<&Color> {
    chart
        .layers()
        .layers()
        .iter()
        .rev()
        .filter(|layer| layer.visible)
        .find_map(|layer| layer.get_world_cell(x, y))
        .or_else(|| chart.grid().get(x, y))
}

/// Render the chart as symbols, one letter per distinct color.
///
/// Returns the grid and a legend mapping each symbol to its color. Symbols are
/// assigned in order of first appearance, reading row by row.
pub fn render_symbols(chart: &Chart) -> (String, String) {
    let mut symbols: BTreeMap<char, &Color> = BTreeMap::new();
    let mut assigned: Vec<(&Color, char)> = Vec::new();
    let mut next = 'a';

    let mut output = column_header(chart.width());
    for y in 0..chart.height() as i32 {
        output.push_str(&format!("{:>3} ", y + 1));
        for x in 0..chart.width() as i32 {
            let symbol = match top_color(chart, x, y) {
                None => EMPTY_SYMBOL,
                Some(color) => match assigned.iter().find(|(c, _)| *c == color) {
                    Some(&(_, symbol)) => symbol,
                    None => {
                        let symbol = next;
                        // Past 'z' every further color shares '?'
                        next = if next == 'z' || next == '?' { '?' } else { (next as u8 + 1) as char };
                        assigned.push((color, symbol));
                        symbols.entry(symbol).or_insert(color);
                        symbol
                    }
                },
            };
            output.push_str(&format!("{:>3}", symbol));
        }
        output.push('\n');
    }

    let mut legend = String::from("\nLegend:\n");
    legend.push_str(&format!("  {} = empty\n", EMPTY_SYMBOL));
    for (symbol, color) in symbols {
        legend.push_str(&format!("  {} = {}\n", symbol, color));
    }
    (output, legend)
}
