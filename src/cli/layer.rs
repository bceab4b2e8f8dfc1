//! Layer command implementation

use clap::Subcommand;
use std::path::Path;
use std::process::ExitCode;

use crate::chart::Chart;
use crate::config::KnitConfig;
use crate::error::EditError;
use crate::layer::LayerId;

use super::{open_chart, save_chart, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum LayerAction {
    /// List layers from top to bottom
    List,
    /// Add a layer on top and make it active
    Add {
        /// Layer name (default: "Layer N")
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a layer (the last layer cannot be deleted)
    Delete {
        /// Layer id (default: the active layer)
        id: Option<u32>,
    },
    /// Merge a layer into the one below it
    MergeDown {
        /// Layer id (default: the active layer)
        id: Option<u32>,
    },
    /// Make a layer the active one
    Select { id: u32 },
    /// Hide a layer
    Hide { id: u32 },
    /// Show a hidden layer
    Show { id: u32 },
    /// Set a layer's opacity percentage
    Opacity {
        id: u32,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    /// Move the active layer by whole cells
    Move {
        #[arg(allow_negative_numbers = true)]
        dx: i32,
        #[arg(allow_negative_numbers = true)]
        dy: i32,
    },
    /// Rename a layer
    Rename { id: u32, name: String },
    /// Move a layer to the position of another
    Reorder { id: u32, target: u32 },
}

impl LayerAction {
    fn modifies(&self) -> bool {
        !matches!(self, LayerAction::List)
    }
}

/// Execute the layer command - inspect or edit the layer stack of a design
pub fn run_layer(file: &Path, config: &KnitConfig, action: LayerAction) -> ExitCode {
    let mut chart = match open_chart(file, config) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let modifies = action.modifies();
    match apply(&mut chart, action) {
        Ok(Some(message)) => println!("{}", message),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if modifies {
        if let Err(e) = save_chart(&chart, file) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn select(chart: &mut Chart, id: Option<u32>) -> Result<(), EditError> {
    match id {
        Some(id) => chart.select_layer(LayerId(id)),
        None => Ok(()),
    }
}

fn set_visible(chart: &mut Chart, id: u32, visible: bool) -> Result<(), EditError> {
    let id = LayerId(id);
    let current = chart.layers().get(id).ok_or(EditError::UnknownLayer(id))?.visible;
    if current != visible {
        chart.toggle_layer_visibility(id)?;
    }
    Ok(())
}

/// Apply one action; returns a message for stdout, if any.
fn apply(chart: &mut Chart, action: LayerAction) -> Result<Option<String>, EditError> {
    if !chart.is_layered() && !matches!(action, LayerAction::List | LayerAction::Add { .. }) {
        return Err(EditError::NoLayers);
    }
    let message = match action {
        LayerAction::List => Some(list(chart)),
        LayerAction::Add { name } => Some(format!("Added layer {}", chart.add_layer(name))),
        LayerAction::Delete { id } => {
            select(chart, id)?;
            let removed = chart.delete_layer()?;
            Some(format!("Deleted layer {} '{}'", removed.id, removed.name))
        }
        LayerAction::MergeDown { id } => {
            select(chart, id)?;
            Some(format!("Merged into layer {}", chart.merge_down()?))
        }
        LayerAction::Select { id } => {
            chart.select_layer(LayerId(id))?;
            None
        }
        LayerAction::Hide { id } => {
            set_visible(chart, id, false)?;
            None
        }
        LayerAction::Show { id } => {
            set_visible(chart, id, true)?;
            None
        }
        LayerAction::Opacity { id, value } => {
            chart.set_layer_opacity(LayerId(id), value)?;
            None
        }
        LayerAction::Move { dx, dy } => {
            chart.move_active_layer(dx, dy)?;
            None
        }
        LayerAction::Rename { id, name } => {
            chart.rename_layer(LayerId(id), &name)?;
            None
        }
        LayerAction::Reorder { id, target } => {
            chart.reorder_layer(LayerId(id), LayerId(target))?;
            None
        }
    };
    Ok(message)
}

/// One line per layer, top layer first; the active one is marked with `*`.
fn list(chart: &Chart) -> String {
    if !chart.is_layered() {
        return "(flat chart, no layers)".to_string();
    }
    let active = chart.active_layer_id();
    chart
        .layers()
        .layers()
        .iter()
        .rev()
        .map(|layer| {
            format!(
                "{} {:>3}  {:<20} {:>3}%  {:<7} offset {},{}  {} cells",
                if Some(layer.id) == active { "*" } else { " " },
                layer.id.0,
                layer.name,
                layer.opacity,
                if layer.visible { "visible" } else { "hidden" },
                layer.offset_x,
                layer.offset_y,
                layer.len(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
