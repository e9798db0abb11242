//! Error types for the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing, validating or generating a module.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or semantically invalid input configuration.
    ///
    /// Raised during parsing and validation, before any file is written.
    /// A renderer may also raise it from a defensive re-check; that points
    /// at a validator gap, not a recoverable condition.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure while creating or writing the module tree.
    ///
    /// Always fatal. Partial output may remain on disk; there is no rollback.
    #[error("failed to {action} {}", path.display())]
    Resource {
        /// What was being attempted, e.g. "create directory" or "write file".
        action: &'static str,
        /// The path the operation targeted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration source file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    /// The configuration source file has an unrecognized extension.
    #[error("unsupported config format: {} (use .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A built-in template failed to render.
    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl Error {
    /// Shorthand for a [`Error::Config`] with a formatted message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Wrap an I/O error with the action and path that produced it.
    pub fn resource(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resource {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
