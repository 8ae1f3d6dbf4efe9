/*!
 * Error types for the smi2ass application.
 *
 * This module contains custom error types for the setting loader, the color
 * helpers and the command-line front end, using the thiserror crate for
 * ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the JSON setting files
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The setting file could not be opened or read
    #[error("Failed to read setting file {}: {source}", .path.display())]
    Read {
        /// Full path of the file that was opened
        path: PathBuf,
        source: std::io::Error,
    },

    /// The setting file is not valid JSON or has the wrong shape
    #[error("Failed to parse setting file {}: {source}", .path.display())]
    Parse {
        /// Full path of the file that was parsed
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The language table has no fallback entry
    #[error("Fallback language code \"{key}\" is missing from {file}")]
    MissingFallback {
        /// Name of the required key
        key: &'static str,
        /// Setting file the table came from
        file: String,
    },

    /// The style table is missing a required entry or holds an unusable value
    #[error("Invalid style layout in {file}: {message}")]
    InvalidLayout {
        /// Setting file the table came from
        file: String,
        /// What is wrong with it
        message: String,
    },
}

/// Errors that can occur when translating colors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    /// The name is not part of the CSS3 color table
    #[error("\"{0}\" is not a recognized color name")]
    UnknownColor(String),

    /// The value is not a `#rrggbb` hex string
    #[error("\"{0}\" is not a valid #rrggbb hex color")]
    InvalidHex(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the setting loader
    #[error("Setting error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a color conversion
    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// A command-line value outside its accepted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
