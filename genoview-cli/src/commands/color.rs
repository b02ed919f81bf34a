//! Color command: print the copy-number color of each value

use anyhow::Result;
use genoview_core::LayoutConfig;

use crate::config::Config;
use crate::error::{CliError, CliResult};

pub fn execute(config: &Config, values: &[f64]) -> Result<()> {
    for line in describe(&config.layout, values)? {
        println!("{}", line);
    }
    Ok(())
}

/// One `value<TAB>color` line per value
pub fn describe(layout: &LayoutConfig, values: &[f64]) -> CliResult<Vec<String>> {
    values
        .iter()
        .map(|&value| {
            if value.is_nan() {
                return Err(CliError::invalid_argument("copy-number value must be a number"));
            }
            Ok(format!("{}\t{}", value, layout.color_for_copy_number(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_colors() {
        let lines = describe(&LayoutConfig::default(), &[-2.0, 0.0, 0.5, 1.5]).unwrap();
        assert_eq!(
            lines,
            vec![
                "-2\t#00f".to_string(),
                "0\trgb(255,255,255)".to_string(),
                "0.5\trgb(255,196,196)".to_string(),
                "1.5\t#f00".to_string(),
            ]
        );
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(matches!(
            describe(&LayoutConfig::default(), &[f64::NAN]),
            Err(CliError::InvalidArgument { .. })
        ));
    }
}
