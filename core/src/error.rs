//! Error types and handling for toolman core

use thiserror::Error;

/// Result type alias for toolman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for toolman core
#[derive(Error, Debug)]
pub enum Error {
    /// Registry lookups and construction
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Command runner errors
    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    /// Action dispatch errors
    #[error("Action error: {0}")]
    Action(#[from] ActionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output sink errors
    #[error("Output error: {0}")]
    Output(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown tool: {id}")]
    NotFound { id: String },

    #[error("Tool registered twice: {id}")]
    DuplicateTool { id: String },
}

/// Command runner errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunnerError {
    /// The process could not be started at all
    #[error("Failed to launch `{command}`: {message}")]
    LaunchFailure { command: String, message: String },

    /// The process ran and reported failure
    #[error("Command `{command}` failed with exit code {exit_code}")]
    CommandFailed { command: String, exit_code: i32 },
}

/// Action dispatch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("No tool selected")]
    NoToolSelected,

    #[error("Version check failed for {id}")]
    VersionCheckFailed { id: String },

    #[error("Action '{action}' is not available in the '{profile}' profile")]
    UnsupportedAction { action: String, profile: String },

    #[error("Another action is already running")]
    Busy,
}

/// Configuration-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unknown profile: {name}")]
    UnknownProfile { name: String },
}

impl Error {
    /// Whether the error means an unknown tool id was requested
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Registry(RegistryError::NotFound { .. }))
    }
}
