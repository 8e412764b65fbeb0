//! Registry entries

use crate::config::{ExtraTool, PackageManagerConfig};
use crate::runner::CommandSpec;
use serde::{Deserialize, Serialize};

/// A tool the registry knows how to install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Identifier shown to the user
    pub id: String,

    /// Package installed for this tool
    pub package: String,

    /// Command that installs the tool
    pub install_command: CommandSpec,

    /// Command that prints the tool's version
    pub version_command: CommandSpec,
}

impl ToolEntry {
    /// Entry installed through the package manager
    pub fn packaged(id: &str, package: &str, package_manager: &PackageManagerConfig) -> Self {
        Self {
            id: id.to_string(),
            package: package.to_string(),
            install_command: package_manager.install([package]),
            version_command: CommandSpec::new(id, ["--version"]),
        }
    }

    /// Entry declared in the configuration file
    pub fn from_extra(tool: &ExtraTool, package_manager: &PackageManagerConfig) -> Self {
        let package = tool.package.as_deref().unwrap_or(&tool.id);
        let mut entry = Self::packaged(&tool.id, package, package_manager);
        if let Some(version_command) = &tool.version_command {
            entry.version_command = version_command.clone();
        }
        entry
    }

    /// Whether the tool's executable is already on `PATH`
    pub fn is_on_path(&self) -> bool {
        which::which(&self.version_command.program).is_ok()
    }
}
