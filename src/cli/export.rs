//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use image::Rgba;

use crate::color::parse_color;
use crate::config::KnitConfig;
use crate::export::export_png;

use super::{open_chart, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Background for unpainted cells; an empty config value means transparent.
fn background(config: &KnitConfig, transparent: bool) -> Result<Option<Rgba<u8>>, String> {
    if transparent || config.export.background.is_empty() {
        return Ok(None);
    }
    parse_color(&config.export.background)
        .map(Some)
        .map_err(|e| format!("invalid export background '{}': {}", config.export.background, e))
}

/// Execute the export command - flatten the design and write a PNG
pub fn run_export(file: &Path, config: &KnitConfig, output: &Path, transparent: bool) -> ExitCode {
    let background = match background(config, transparent) {
        Ok(background) => background,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let chart = match open_chart(file, config) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match export_png(&chart, output, config.export.cell_size, background) {
        Ok(image) => {
            eprintln!("Exported {}x{} PNG: {}", image.width(), image.height(), output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_defaults_to_config() {
        let config = KnitConfig::default();
        assert_eq!(background(&config, false), Ok(Some(Rgba([255, 255, 255, 255]))));
        assert_eq!(background(&config, true), Ok(None));
    }

    #[test]
    fn test_empty_background_is_transparent() {
        let mut config = KnitConfig::default();
        config.export.background = String::new();
        assert_eq!(background(&config, false), Ok(None));
    }
}
