//! Configuration types for toolman core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in the CLI layer.

use crate::error::{ConfigError, Result};
use crate::profile::ProfileKind;
use crate::runner::CommandSpec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolmanConfig {
    /// Which tool table and action set to use
    pub profile: ProfileKind,

    /// How package-manager commands are built
    pub package_manager: PackageManagerConfig,

    /// Tools appended to the profile's registry
    pub extra_tools: Vec<ExtraTool>,

    /// Project cloned and installed by `install-esim`
    pub external_project: ExternalProjectConfig,
}

/// Package manager invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageManagerConfig {
    /// Package manager executable
    pub program: String,

    /// Subcommand that installs packages
    pub install_verb: String,

    /// Subcommand that upgrades packages
    pub upgrade_verb: String,

    /// Flag appended to skip confirmation prompts
    pub assume_yes_flag: Option<String>,

    /// Prefix commands with `sudo`
    pub use_sudo: bool,

    /// Pass `-n` to sudo so a missing credential fails instead of prompting
    pub sudo_non_interactive: bool,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: "apt".to_string(),
            install_verb: "install".to_string(),
            upgrade_verb: "upgrade".to_string(),
            assume_yes_flag: Some("-y".to_string()),
            use_sudo: true,
            sudo_non_interactive: false,
        }
    }
}

impl PackageManagerConfig {
    /// Command installing `packages` in a single invocation
    pub fn install<I, S>(&self, packages: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build(&self.install_verb, packages)
    }

    /// Command upgrading `packages` in a single invocation
    pub fn upgrade<I, S>(&self, packages: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build(&self.upgrade_verb, packages)
    }

    fn build<I, S>(&self, verb: &str, packages: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base = if self.use_sudo {
            let mut sudo = CommandSpec::new("sudo", Vec::<String>::new());
            if self.sudo_non_interactive {
                sudo = sudo.arg("-n");
            }
            sudo.arg(self.program.as_str())
        } else {
            CommandSpec::new(self.program.as_str(), Vec::<String>::new())
        };

        base.arg(verb)
            .args(packages)
            .args(self.assume_yes_flag.iter().cloned())
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("package_manager.program", &self.program),
            ("package_manager.install_verb", &self.install_verb),
            ("package_manager.upgrade_verb", &self.upgrade_verb),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A tool declared in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraTool {
    /// Tool identifier
    pub id: String,

    /// Package to install, defaults to the identifier
    #[serde(default)]
    pub package: Option<String>,

    /// Command printing the tool's version, defaults to `<id> --version`
    #[serde(default)]
    pub version_command: Option<CommandSpec>,
}

/// Repository cloned and installed by the external-project action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalProjectConfig {
    /// Display name
    pub name: String,

    /// Git URL to clone
    pub repository: String,

    /// Clone destination, `~` is expanded
    pub directory: String,

    /// Installer to run inside the clone
    pub installer: String,

    /// Arguments for the installer
    pub installer_args: Vec<String>,
}

impl Default for ExternalProjectConfig {
    fn default() -> Self {
        Self {
            name: "eSim".to_string(),
            repository: "https://github.com/FOSSEE/eSim.git".to_string(),
            directory: "eSim".to_string(),
            installer: "./install.sh".to_string(),
            installer_args: Vec::new(),
        }
    }
}

impl ExternalProjectConfig {
    /// Clone destination with `~` expanded
    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.directory).into_owned())
    }

    /// Shallow clone of the repository
    pub fn clone_command(&self) -> CommandSpec {
        CommandSpec::new("git", ["clone", "--depth=1"])
            .arg(self.repository.as_str())
            .arg(self.directory_path().to_string_lossy())
    }

    /// Installer invocation inside the clone
    pub fn install_command(&self) -> CommandSpec {
        CommandSpec::new(self.installer.as_str(), self.installer_args.iter().cloned())
            .with_current_dir(self.directory_path())
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("external_project.repository", &self.repository),
            ("external_project.directory", &self.directory),
            ("external_project.installer", &self.installer),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl ToolmanConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.package_manager.validate()?;
        self.external_project.validate()?;

        for (index, tool) in self.extra_tools.iter().enumerate() {
            if tool.id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("extra_tools[{}].id", index),
                    value: tool.id.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}
