//! CLI-specific output implementations
//!
//! Concrete implementation of the core output abstraction for the terminal.

pub mod cli_handler;

pub use cli_handler::{CliOutputConfig, CliOutputHandler};
