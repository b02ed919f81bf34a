//! Error handling for the genoview CLI

use std::path::PathBuf;
use thiserror::Error;

/// User-facing errors raised by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unknown chromosome: {name}")]
    UnknownChromosome { name: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    pub fn unknown_chromosome<S: Into<String>>(name: S) -> Self {
        Self::UnknownChromosome { name: name.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }
}

impl From<genoview_render::RenderError> for CliError {
    fn from(err: genoview_render::RenderError) -> Self {
        Self::rendering(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your genoview.toml configuration file\n\
                 • Use 'genoview config --example' to generate a sample configuration",
            );
        }

        CliError::UnknownChromosome { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use 1-22, X or Y, with or without a 'chr' prefix\n\
                 • Check that --assembly matches your input data",
            );
        }

        CliError::InvalidArgument { .. } => {
            message.push_str("\n\nRun 'genoview --help' for usage.");
        }

        CliError::Rendering { .. } => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
