//! Minimal configuration module for toolman core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{ExternalProjectConfig, ExtraTool, PackageManagerConfig, ToolmanConfig};
