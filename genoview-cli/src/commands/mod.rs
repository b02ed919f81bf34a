//! Command implementations for the genoview CLI

pub mod color;
pub mod config;
pub mod locate;
pub mod render;

use genoview_core::{Assembly, ChromosomeReference, LayoutConfig};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Reference table for the assembly chosen on the command line, falling back to the config
pub fn reference_for(config: &Config, assembly: Option<Assembly>) -> ChromosomeReference {
    let assembly = assembly.unwrap_or(config.reference.assembly);
    log::debug!("Using reference assembly {}", assembly);
    ChromosomeReference::for_assembly(assembly)
}

/// Configured layout with an optional canvas width override
pub fn layout_for(config: &Config, width: Option<f64>) -> CliResult<LayoutConfig> {
    let mut layout = config.layout.clone();
    if let Some(width) = width {
        layout.canvas_width = width;
    }
    layout
        .validate()
        .map_err(|e| CliError::invalid_argument(e.to_string()))?;
    Ok(layout)
}
