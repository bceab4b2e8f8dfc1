//! Draw command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::chart::Chart;
use crate::color::Color;
use crate::config::KnitConfig;
use crate::error::EditError;
use crate::layer::LayerId;
use crate::mirror::MirrorAxis;
use crate::shapes::ShapeKind;

use super::{
    open_chart, parse_point, parse_span, save_chart, split_color, EXIT_ERROR, EXIT_INVALID_ARGS,
    EXIT_SUCCESS,
};

/// Raw draw operations as given on the command line
#[derive(Debug, Default)]
pub struct DrawOps {
    pub set: Vec<String>,
    pub erase: Vec<String>,
    pub line: Vec<String>,
    pub rect: Vec<String>,
    pub ellipse: Vec<String>,
    pub flood: Vec<String>,
    pub mirror: Vec<String>,
    pub filled: bool,
}

/// A parsed, validated draw operation
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Set((i32, i32), Color),
    Erase((i32, i32)),
    Shape(ShapeKind, (i32, i32), (i32, i32), Color),
    Flood((i32, i32), Color),
}

fn parse_color_arg(token: &str) -> Result<Color, String> {
    Color::parse(token).map_err(|e| format!("invalid color '{}': {}", token, e))
}

fn parse_ops(ops: &DrawOps) -> Result<(Vec<MirrorAxis>, Vec<Op>), String> {
    let axes = ops
        .mirror
        .iter()
        .map(|s| MirrorAxis::from_str(s).ok_or_else(|| format!("unknown mirror axis '{}' (expected h, v or d)", s)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut parsed = Vec::new();
    for arg in &ops.set {
        let (coords, color) = split_color(arg)?;
        parsed.push(Op::Set(parse_point(coords)?, parse_color_arg(color)?));
    }
    for arg in &ops.erase {
        parsed.push(Op::Erase(parse_point(arg)?));
    }
    let shapes =
        [(ShapeKind::Line, &ops.line), (ShapeKind::Rectangle, &ops.rect), (ShapeKind::Ellipse, &ops.ellipse)];
    for (kind, args) in shapes {
        for arg in args {
            let (coords, color) = split_color(arg)?;
            let (from, to) = parse_span(coords)?;
            parsed.push(Op::Shape(kind, from, to, parse_color_arg(color)?));
        }
    }
    for arg in &ops.flood {
        let (coords, color) = split_color(arg)?;
        parsed.push(Op::Flood(parse_point(coords)?, parse_color_arg(color)?));
    }
    Ok((axes, parsed))
}

fn apply(chart: &mut Chart, op: Op, filled: bool) -> Result<(), EditError> {
    match op {
        Op::Set((x, y), color) => {
            chart.select_color(color);
            chart.paint(x, y)
        }
        Op::Erase((x, y)) => chart.erase(x, y),
        Op::Shape(kind, from, to, color) => {
            chart.select_color(color);
            chart.draw_shape(kind, from, to, filled).map(|_| ())
        }
        Op::Flood((x, y), color) => {
            chart.select_color(color);
            match chart.fill(x, y) {
                Err(EditError::FillNoop { .. }) => {
                    eprintln!("Warning: fill at {},{} changes nothing", x, y);
                    Ok(())
                }
                other => other.map(|_| ()),
            }
        }
    }
}

/// Execute the draw command - apply edits to a design file
pub fn run_draw(
    file: &Path,
    config: &KnitConfig,
    layer: Option<u32>,
    ops: &DrawOps,
    output: Option<&Path>,
    dry_run: bool,
) -> ExitCode {
    let (axes, parsed) = match parse_ops(ops) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if axes.is_empty() && parsed.is_empty() {
        eprintln!("Error: No draw operations specified");
        eprintln!("Use --set, --erase, --line, --rect, --ellipse or --flood");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut chart = match open_chart(file, config) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let original = chart.to_document();

    if let Some(id) = layer {
        if let Err(e) = chart.select_layer(LayerId(id)) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    for axis in axes {
        if !chart.mirror().config().is_enabled(axis) {
            chart.toggle_mirror(axis);
        }
    }

    for op in parsed {
        if let Err(e) = apply(&mut chart, op, ops.filled) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if dry_run {
        let before = original.to_json().unwrap_or_default();
        let after = chart.to_document().to_json().unwrap_or_default();
        if before == after {
            println!("No changes.");
        } else {
            print_simple_diff(&before, &after);
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let output_path = output.unwrap_or(file);
    if let Err(e) = save_chart(&chart, output_path) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    eprintln!("Wrote: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// Print a line-based diff between two design files.
fn print_simple_diff(original: &str, modified: &str) {
    let orig_lines: Vec<&str> = original.lines().collect();
    let mod_lines: Vec<&str> = modified.lines().collect();

    let max_len = orig_lines.len().max(mod_lines.len());
    for i in 0..max_len {
        let orig = orig_lines.get(i).copied().unwrap_or("");
        let modi = mod_lines.get(i).copied().unwrap_or("");
        if orig != modi {
            if !orig.is_empty() {
                println!("-{}", orig);
            }
            if !modi.is_empty() {
                println!("+{}", modi);
            }
        }
    }
}
