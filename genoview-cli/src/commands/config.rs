//! Config command: print or write genoview.toml

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, output: Option<PathBuf>) -> Result<()> {
    let selected = if example { Config::default() } else { config.clone() };

    match output {
        Some(path) => {
            if path.exists() {
                log::warn!("Overwriting existing file: {}", path.display());
            }
            selected.save_to_file(&path)?;
            log::info!("Wrote configuration to {}", path.display());
        }
        None => {
            let content = if example { Config::example_toml()? } else { selected.to_toml()? };
            print!("{}", content);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use genoview_core::Assembly;

    #[test]
    fn test_write_example_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("genoview.toml");

        let mut loaded = Config::default();
        loaded.reference.assembly = Assembly::Hg38;
        execute(&loaded, true, Some(path.clone()))?;
        assert_eq!(Config::load_from_file(&path)?.reference.assembly, Assembly::Hg19);

        execute(&loaded, false, Some(path.clone()))?;
        assert_eq!(Config::load_from_file(&path)?.reference.assembly, Assembly::Hg38);
        Ok(())
    }
}
