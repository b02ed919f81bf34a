//! Error types for coordinate mapping, layout validation and input parsing

use thiserror::Error;

use crate::types::ChromIndex;

#[derive(Debug, Error)]
pub enum GenomeError {
    #[error("Chromosome {chromosome} out of range (reference has 1..={count})")]
    ChromosomeOutOfRange { chromosome: ChromIndex, count: usize },
    #[error("Unknown chromosome name: {0}")]
    UnknownChromosome(String),
    #[error("Invalid reference table: {0}")]
    InvalidReference(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenomeError {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Parse { line, message: message.into() }
    }
}

/// Result type for core operations
pub type GenomeResult<T> = Result<T, GenomeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenomeError::ChromosomeOutOfRange { chromosome: 25, count: 24 };
        assert_eq!(err.to_string(), "Chromosome 25 out of range (reference has 1..=24)");

        let err = GenomeError::parse(3, "missing column");
        assert_eq!(err.to_string(), "Parse error on line 3: missing column");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GenomeError = io_err.into();
        assert!(matches!(err, GenomeError::Io(_)));
    }
}
