//! New command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::chart::Chart;
use crate::config::KnitConfig;

use super::{save_chart, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the new command - write an empty design sized from the config
pub fn run_new(file: &Path, config: &KnitConfig, force: bool) -> ExitCode {
    if file.exists() && !force {
        eprintln!("Error: '{}' already exists (use --force to overwrite)", file.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let chart = match Chart::with_options(config.chart_options()) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Err(e) = save_chart(&chart, file) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let kind = if chart.is_layered() { "layered" } else { "flat" };
    eprintln!("Created {}x{} {} chart: {}", chart.width(), chart.height(), kind, file.display());
    ExitCode::from(EXIT_SUCCESS)
}
