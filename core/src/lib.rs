//! # toolman Core
//!
//! Core library for toolman - installs, updates and version-checks a fixed
//! set of development and eSim tools through the system package manager.
//!
//! The pieces are deliberately small:
//!
//! - [`registry::ToolRegistry`] maps tool ids to the commands that install them
//! - [`runner::CommandRunner`] executes one command and streams its output
//! - [`actions::ActionDispatcher`] ties the two together for each user action
//!
//! Commands are argument lists, never shell strings.

// Core modules
pub mod actions;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod registry;
pub mod runner;

// Re-export commonly used types
pub use actions::{Action, ActionDispatcher};
pub use config::{PackageManagerConfig, ToolmanConfig};
pub use error::{Error, Result};
pub use output::{ActionEvent, ActionOutput};
pub use profile::{Profile, ProfileKind};
pub use registry::{ToolEntry, ToolRegistry};
pub use runner::{CommandRunner, CommandSpec, DryRunRunner, ExecutionResult, Outcome, ProcessRunner};

/// Current version of the toolman-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
