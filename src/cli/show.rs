//! Show command implementation (terminal display)

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use crate::config::KnitConfig;
use crate::export::flatten;
use crate::terminal::{render_ansi, render_symbols};

use super::{open_chart, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the show command - print the chart with row and column rulers
///
/// Colored output is used only when stdout is a terminal and `plain` is off.
pub fn run_show(file: &Path, config: &KnitConfig, plain: bool) -> ExitCode {
    let chart = match open_chart(file, config) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if plain || !std::io::stdout().is_terminal() {
        let (grid, legend) = render_symbols(&chart);
        print!("{}", grid);
        print!("{}", legend);
        return ExitCode::from(EXIT_SUCCESS);
    }

    match flatten(&chart, None) {
        Ok(image) => {
            print!("{}", render_ansi(&image));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
