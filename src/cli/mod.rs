//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod draw;
mod export;
mod layer;
mod new;
mod show;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::chart::Chart;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, KnitConfig};
use crate::document::DesignDocument;
use crate::logging;

pub use layer::LayerAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Knitchart - design layered knitting charts from the command line
#[derive(Parser)]
#[command(name = "knitchart")]
#[command(about = "Knitchart - design layered knitting charts from the command line")]
#[command(version)]
pub struct Cli {
    /// Path to a knitchart.toml (default: search upwards from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log edits to stderr (KNITCHART_LOG and RUST_LOG take precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty design file
    New {
        /// Design file to create (.json)
        file: PathBuf,

        /// Grid width in cells
        #[arg(long)]
        width: Option<u32>,

        /// Grid height in cells
        #[arg(long)]
        height: Option<u32>,

        /// Create a chart without layers
        #[arg(long)]
        flat: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Paint cells, shapes and fills into a design.
    ///
    /// Coordinates are 0-based, x to the right and y down. Operations run in
    /// this order: mirror toggles, --set, --erase, --line, --rect, --ellipse,
    /// --flood.
    Draw {
        /// Design file to modify
        file: PathBuf,

        /// Layer id to draw on (default: the active layer)
        #[arg(long)]
        layer: Option<u32>,

        /// Paint a cell: x,y=color (e.g. --set 5,10=#FF0000)
        #[arg(long, value_name = "X,Y=COLOR")]
        set: Vec<String>,

        /// Erase a cell: x,y (e.g. --erase 5,10)
        #[arg(long, value_name = "X,Y")]
        erase: Vec<String>,

        /// Draw a line: x0,y0,x1,y1=color
        #[arg(long, value_name = "X0,Y0,X1,Y1=COLOR")]
        line: Vec<String>,

        /// Draw a rectangle between two corners: x0,y0,x1,y1=color
        #[arg(long, value_name = "X0,Y0,X1,Y1=COLOR")]
        rect: Vec<String>,

        /// Draw an ellipse inside two corners: x0,y0,x1,y1=color
        #[arg(long, value_name = "X0,Y0,X1,Y1=COLOR")]
        ellipse: Vec<String>,

        /// Fill rectangles and ellipses instead of outlining them
        #[arg(long)]
        filled: bool,

        /// Flood fill from a cell: x,y=color
        #[arg(long, value_name = "X,Y=COLOR")]
        flood: Vec<String>,

        /// Enable a mirror axis before drawing: h, v or d (repeatable)
        #[arg(long, value_name = "AXIS")]
        mirror: Vec<String>,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the layers of a design
    Layer {
        /// Design file to modify
        file: PathBuf,

        #[command(subcommand)]
        action: LayerAction,
    },

    /// Display a design in the terminal
    Show {
        /// Design file to display
        file: PathBuf,

        /// Print letters and a legend instead of colored cells
        #[arg(long)]
        plain: bool,
    },

    /// Export a design as a PNG image
    Export {
        /// Design file to export
        file: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Pixels per chart cell (default: from config, 20)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=256))]
        cell_size: Option<u32>,

        /// Leave unpainted cells transparent instead of using the background color
        #[arg(long)]
        transparent: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }
    execute(cli)
}

/// Dispatch a parsed command line
pub fn execute(cli: Cli) -> ExitCode {
    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::New { file, width, height, flat, force } => {
            let overrides = CliOverrides { width, height, flat: flat.then_some(true), ..Default::default() };
            merge_cli_overrides(&mut config, &overrides);
            new::run_new(&file, &config, force)
        }
        Commands::Draw { file, layer, set, erase, line, rect, ellipse, filled, flood, mirror, output, dry_run } => {
            let ops = draw::DrawOps { set, erase, line, rect, ellipse, flood, mirror, filled };
            draw::run_draw(&file, &config, layer, &ops, output.as_deref(), dry_run)
        }
        Commands::Layer { file, action } => layer::run_layer(&file, &config, action),
        Commands::Show { file, plain } => show::run_show(&file, &config, plain),
        Commands::Export { file, output, cell_size, transparent } => {
            let overrides = CliOverrides { cell_size, ..Default::default() };
            merge_cli_overrides(&mut config, &overrides);
            export::run_export(&file, &config, &output, transparent)
        }
    }
}

/// Load a design file into a chart built from the configuration.
pub(crate) fn open_chart(path: &Path, config: &KnitConfig) -> Result<Chart, String> {
    let document =
        DesignDocument::read(path).map_err(|e| format!("cannot load '{}': {}", path.display(), e))?;
    let mut chart = Chart::with_options(config.chart_options()).map_err(|e| e.to_string())?;
    chart.load_document(document).map_err(|e| format!("cannot load '{}': {}", path.display(), e))?;
    Ok(chart)
}

/// Write a chart to a design file.
pub(crate) fn save_chart(chart: &Chart, path: &Path) -> Result<(), String> {
    chart.to_document().write(path).map_err(|e| format!("cannot write '{}': {}", path.display(), e))
}

/// Parse `x,y` into a coordinate pair.
pub(crate) fn parse_point(s: &str) -> Result<(i32, i32), String> {
    match parse_ints(s)?.as_slice() {
        [x, y] => Ok((*x, *y)),
        _ => Err(format!("expected X,Y but got '{}'", s)),
    }
}

/// Parse `x0,y0,x1,y1` into two corners.
pub(crate) fn parse_span(s: &str) -> Result<((i32, i32), (i32, i32)), String> {
    match parse_ints(s)?.as_slice() {
        [x0, y0, x1, y1] => Ok(((*x0, *y0), (*x1, *y1))),
        _ => Err(format!("expected X0,Y0,X1,Y1 but got '{}'", s)),
    }
}

/// Split `coords=color` at the first '='.
pub(crate) fn split_color(s: &str) -> Result<(&str, &str), String> {
    s.split_once('=').ok_or_else(|| format!("expected COORDS=COLOR but got '{}'", s))
}

fn parse_ints(s: &str) -> Result<Vec<i32>, String> {
    s.split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|_| format!("invalid number '{}' in '{}'", part.trim(), s)))
        .collect()
}
