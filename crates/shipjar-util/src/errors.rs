use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all shipjar operations.
#[derive(Debug, Error, Diagnostic)]
pub enum ShipjarError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed project description (`shipjar.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your shipjar.toml for syntax errors"))]
    Manifest { message: String },

    /// Missing or unsatisfiable publish configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help(
        "Set the value in [publish] of shipjar.toml or provide it through local.properties"
    ))]
    Configuration { message: String },

    /// The project's platform has no publication strategy.
    #[error("Unsupported platform in project `{project}`: {message}")]
    UnsupportedPlatform { project: String, message: String },

    /// The Android build variant selected for publishing does not exist.
    #[error("No variant `{variant}` found in project `{project}` (available: {available})")]
    #[diagnostic(help("Set [publish].android-variant to one of the declared build types"))]
    MissingVariant {
        project: String,
        variant: String,
        available: String,
    },

    /// A host build task failed. The host's output is passed through verbatim.
    #[error("Task `{task}` failed: {message}")]
    TaskFailure { task: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl ShipjarError {
    /// Shorthand for a [`ShipjarError::Configuration`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type ShipjarResult<T> = miette::Result<T>;
