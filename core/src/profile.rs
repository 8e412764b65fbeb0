//! Profiles: which tool table and which actions a session exposes

use crate::actions::Action;
use crate::config::{ExternalProjectConfig, PackageManagerConfig, ToolmanConfig};
use crate::error::{ConfigError, Error, Result};
use crate::registry::builtin::{DEV_TOOLS, ESIM_TOOLS};
use crate::registry::{ToolEntry, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selectable profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// General development tools
    Dev,
    /// eSim and its EDA dependencies
    Esim,
    /// Both tables merged
    #[default]
    All,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Dev => "dev",
            ProfileKind::Esim => "esim",
            ProfileKind::All => "all",
        }
    }

    /// Human-readable heading for tool listings
    pub fn title(&self) -> &'static str {
        match self {
            ProfileKind::Dev => "Development Tools",
            ProfileKind::Esim => "eSim Tools",
            ProfileKind::All => "Development and eSim Tools",
        }
    }

    /// Actions offered by this profile
    pub fn actions(&self) -> &'static [Action] {
        match self {
            ProfileKind::Dev => &[
                Action::List,
                Action::Install,
                Action::Update,
                Action::CheckVersion,
            ],
            ProfileKind::Esim => &[
                Action::List,
                Action::Install,
                Action::InstallAll,
                Action::InstallExternal,
            ],
            ProfileKind::All => &[
                Action::List,
                Action::Install,
                Action::Update,
                Action::CheckVersion,
                Action::InstallAll,
                Action::InstallExternal,
            ],
        }
    }

    pub fn supports(&self, action: Action) -> bool {
        self.actions().contains(&action)
    }

    /// Built-in registry for this profile
    pub fn builtin_registry(&self, package_manager: &PackageManagerConfig) -> Result<ToolRegistry> {
        match self {
            ProfileKind::Dev => ToolRegistry::from_table(DEV_TOOLS, package_manager),
            ProfileKind::Esim => ToolRegistry::from_table(ESIM_TOOLS, package_manager),
            ProfileKind::All => Ok(ToolRegistry::from_table(DEV_TOOLS, package_manager)?
                .merge(ToolRegistry::from_table(ESIM_TOOLS, package_manager)?)),
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(ProfileKind::Dev),
            "esim" => Ok(ProfileKind::Esim),
            "all" => Ok(ProfileKind::All),
            _ => Err(ConfigError::UnknownProfile {
                name: s.to_string(),
            }
            .into()),
        }
    }
}

/// A resolved profile: registry plus everything needed to build commands
#[derive(Debug, Clone)]
pub struct Profile {
    pub kind: ProfileKind,
    pub registry: ToolRegistry,
    pub package_manager: PackageManagerConfig,
    /// Only set for profiles offering the external-project action
    pub external_project: Option<ExternalProjectConfig>,
}

impl Profile {
    /// Resolve the profile named by `config`
    pub fn from_config(config: &ToolmanConfig) -> Result<Self> {
        config.validate()?;

        let kind = config.profile;
        let package_manager = config.package_manager.clone();

        let extra = ToolRegistry::new(
            config
                .extra_tools
                .iter()
                .map(|tool| ToolEntry::from_extra(tool, &package_manager))
                .collect(),
        )?;
        let registry = kind.builtin_registry(&package_manager)?.overlay(extra);

        let external_project = kind
            .supports(Action::InstallExternal)
            .then(|| config.external_project.clone());

        Ok(Self {
            kind,
            registry,
            package_manager,
            external_project,
        })
    }

    pub fn supports(&self, action: Action) -> bool {
        self.kind.supports(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtraTool;

    #[test]
    fn test_parse_profile_names() {
        assert_eq!("dev".parse::<ProfileKind>().unwrap(), ProfileKind::Dev);
        assert_eq!(" ESIM ".parse::<ProfileKind>().unwrap(), ProfileKind::Esim);
        assert_eq!("all".parse::<ProfileKind>().unwrap(), ProfileKind::All);
        assert!("gui".parse::<ProfileKind>().is_err());
    }

    #[test]
    fn test_action_sets() {
        assert!(ProfileKind::Dev.supports(Action::Update));
        assert!(ProfileKind::Dev.supports(Action::CheckVersion));
        assert!(!ProfileKind::Dev.supports(Action::InstallAll));
        assert!(!ProfileKind::Dev.supports(Action::InstallExternal));

        assert!(ProfileKind::Esim.supports(Action::InstallAll));
        assert!(!ProfileKind::Esim.supports(Action::Update));

        for action in Action::ALL {
            assert!(ProfileKind::All.supports(*action));
        }
    }

    #[test]
    fn test_from_config_applies_extra_tools() {
        let config = ToolmanConfig {
            profile: ProfileKind::Esim,
            extra_tools: vec![
                ExtraTool {
                    id: "iverilog".to_string(),
                    package: None,
                    version_command: None,
                },
                // Replaces the built-in entry
                ExtraTool {
                    id: "kicad".to_string(),
                    package: Some("kicad-nightly".to_string()),
                    version_command: None,
                },
            ],
            ..Default::default()
        };

        let profile = Profile::from_config(&config).unwrap();
        assert_eq!(profile.registry.ids().last(), Some(&"iverilog"));
        assert_eq!(
            profile.registry.lookup("kicad").unwrap().package,
            "kicad-nightly"
        );
        assert_eq!(profile.registry.ids()[1], "kicad");
        assert_eq!(profile.registry.len(), ESIM_TOOLS.len() + 1);
        assert!(profile.external_project.is_some());
    }

    #[test]
    fn test_dev_profile_has_no_external_project() {
        let config = ToolmanConfig {
            profile: ProfileKind::Dev,
            ..Default::default()
        };
        let profile = Profile::from_config(&config).unwrap();
        assert!(profile.external_project.is_none());
        assert_eq!(profile.registry.len(), DEV_TOOLS.len());
    }
}
