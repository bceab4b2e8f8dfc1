//! Configuration schema types for `knitchart.toml`
//!
//! Every section and field is optional; missing values take the defaults below.

use crate::chart::{ChartOptions, DEFAULT_LAYER_NAME, DEFAULT_MIN_SIZE, DEFAULT_SIZE, MAX_SIZE};
use crate::color::{parse_color, Color};
use crate::mirror::MirrorConfig;
use crate::palette::{Palette, DEFAULT_COLORS, DEFAULT_MAX_COLORS};
use crate::undo::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

/// Grid size settings for new charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    /// Smallest width or height a chart may be resized to
    pub min_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { width: DEFAULT_SIZE, height: DEFAULT_SIZE, min_size: DEFAULT_MIN_SIZE }
    }
}

/// Layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    /// Create new charts with a layer; `false` creates flat charts
    pub enabled: bool,
    /// Name of the first layer
    pub default_name: String,
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self { enabled: true, default_name: DEFAULT_LAYER_NAME.to_string() }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Snapshots kept before the oldest is dropped
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Mirror settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorSection {
    /// Re-apply mirroring after every edit
    pub live_update: bool,
}

impl Default for MirrorSection {
    fn default() -> Self {
        Self { live_update: true }
    }
}

/// Palette settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub colors: Vec<String>,
    pub max_colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(), max_colors: DEFAULT_MAX_COLORS }
    }
}

/// PNG export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Pixels per chart cell
    pub cell_size: u32,
    /// Color behind unpainted cells; empty string for transparent
    pub background: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { cell_size: 20, background: "#FFFFFF".to_string() }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnitConfig {
    pub grid: GridConfig,
    pub layers: LayersConfig,
    pub history: HistoryConfig,
    pub mirror: MirrorSection,
    pub palette: PaletteConfig,
    pub export: ExportConfig,
}

/// A configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "grid.min_size")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "knitchart.toml: '{}' {}", self.field, self.message)
    }
}

impl KnitConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message })
        };

        if self.grid.min_size == 0 {
            push("grid.min_size", "must be a positive integer".to_string());
        }
        if self.grid.width < self.grid.min_size {
            push("grid.width", format!("must be at least grid.min_size ({})", self.grid.min_size));
        }
        if self.grid.height < self.grid.min_size {
            push("grid.height", format!("must be at least grid.min_size ({})", self.grid.min_size));
        }
        if self.grid.width > MAX_SIZE {
            push("grid.width", format!("must be at most {}", MAX_SIZE));
        }
        if self.grid.height > MAX_SIZE {
            push("grid.height", format!("must be at most {}", MAX_SIZE));
        }
        if self.layers.default_name.trim().is_empty() {
            push("layers.default_name", "must be a non-empty string".to_string());
        }
        if self.history.max_depth == 0 {
            push("history.max_depth", "must be a positive integer".to_string());
        }
        if self.palette.max_colors == 0 {
            push("palette.max_colors", "must be a positive integer".to_string());
        }
        if self.palette.colors.len() > self.palette.max_colors {
            push("palette.colors", format!("has more than palette.max_colors ({}) entries", self.palette.max_colors));
        }
        for (i, color) in self.palette.colors.iter().enumerate() {
            if let Err(e) = parse_color(color) {
                push(&format!("palette.colors[{}]", i), format!("is not a valid color: {}", e));
            }
        }
        if self.export.cell_size == 0 {
            push("export.cell_size", "must be a positive integer".to_string());
        }
        if !self.export.background.is_empty() {
            if let Err(e) = parse_color(&self.export.background) {
                push("export.background", format!("is not a valid color: {}", e));
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Settings for a new chart built from this configuration
    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.grid.width,
            height: self.grid.height,
            min_size: self.grid.min_size,
            layers: self.layers.enabled,
            layer_name: self.layers.default_name.clone(),
            history_depth: self.history.max_depth,
            mirror: MirrorConfig { live_update: self.mirror.live_update, ..Default::default() },
            palette: Palette::new(
                self.palette.colors.iter().map(|c| Color::new(c.as_str())).collect(),
                self.palette.max_colors,
            ),
        }
    }
}
