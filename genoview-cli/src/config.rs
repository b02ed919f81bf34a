//! Configuration handling for the genoview CLI
//!
//! Supports loading configuration from genoview.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use clap::ValueEnum;
use genoview_core::{Assembly, LayoutConfig};
use genoview_render::DEFAULT_TARGET;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "genoview.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Genome assembly used for chromosome lengths
    #[serde(default)]
    pub assembly: Assembly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Plot target id
    #[serde(default = "default_target")]
    pub target: String,

    /// Output format; detected from the file extension when unset
    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_background")]
    pub background_color: String,

    /// Replaces the font family of every label
    #[serde(default)]
    pub font_family: Option<String>,

    /// Stamp SVG output with the generation time
    #[serde(default)]
    pub footer: bool,
}

fn default_target() -> String { DEFAULT_TARGET.to_string() }
fn default_background() -> String { "#ffffff".to_string() }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            format: None,
            title: None,
            background_color: default_background(),
            font_family: None,
            footer: false,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        config
            .layout
            .validate()
            .context("Invalid [layout] section in configuration")?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        Self::default().to_toml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reference.assembly, Assembly::Hg19);
        assert_eq!(config.render.target, "genomic-overview");
        assert_eq!(config.layout.canvas_width, 1200.0);
        assert!(!config.render.footer);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.reference.assembly = Assembly::Hg38;
        config.render.format = Some(OutputFormat::Json);
        config.layout.row_count = 4;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded.reference.assembly, Assembly::Hg38);
        assert_eq!(loaded.render.format, Some(OutputFormat::Json));
        assert_eq!(loaded.layout, config.layout);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(
            temp_file.path(),
            "[reference]\nassembly = \"hg38\"\n\n[layout]\nrow_count = 3\n",
        )?;

        let config = Config::load(Some(temp_file.path()))?;
        assert_eq!(config.reference.assembly, Assembly::Hg38);
        assert_eq!(config.layout.row_count, 3);
        assert_eq!(config.layout.left_margin, 25.0);
        assert_eq!(config.render.background_color, "#ffffff");
        Ok(())
    }

    #[test]
    fn test_invalid_layout_is_rejected() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[layout]\ncanvas_width = 50.0\n")?;
        assert!(Config::load(Some(temp_file.path())).is_err());
        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[reference]"));
        assert!(example.contains("[render]"));
        assert!(example.contains("[layout]"));
        assert!(example.contains("assembly = \"hg19\""));
        Ok(())
    }
}
