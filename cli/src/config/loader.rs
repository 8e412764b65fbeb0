//! Simple CLI configuration loader for toolman
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./toolman.json or ./.toolman/config.json
//! 3. Git repository root: <repo_root>/.toolman/config.json
//! 4. User config dir: $XDG_CONFIG_HOME/toolman/config.json or ~/.config/toolman/config.json
//! 5. Built-in defaults (no files)

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use toolman_core::{ProfileKind, ToolmanConfig};
use tracing::debug;

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    profile_override: Option<ProfileKind>,
    no_sudo: bool,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set profile override
    pub fn with_profile_override(mut self, profile: ProfileKind) -> Self {
        self.profile_override = Some(profile);
        self
    }

    /// Drop `sudo` from package-manager commands
    pub fn with_no_sudo(mut self, no_sudo: bool) -> Self {
        self.no_sudo = no_sudo;
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ToolmanConfig> {
        // Step 1: Find and load base configuration
        let config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            let cwd = std::env::current_dir()?;
            self.search_and_load(&cwd).await?
        };

        // Step 2: Apply flag overrides
        self.finish(config)
    }

    fn finish(&self, mut config: ToolmanConfig) -> Result<ToolmanConfig> {
        if let Some(profile) = self.profile_override {
            config.profile = profile;
        }
        if self.no_sudo {
            config.package_manager.use_sudo = false;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self, cwd: &Path) -> Result<ToolmanConfig> {
        // 1. Current working directory
        if let Some(config) = self.try_load_dir(cwd).await? {
            return Ok(config);
        }

        // 2. Git repository root
        if let Some(git_root) = find_git_root(cwd) {
            let config_path = git_root.join(".toolman").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        // 3. User config directory
        if let Some(config_dir) = user_config_dir() {
            let config_path = config_dir.join("toolman").join("config.json");
            if config_path.exists() {
                return self.load_file(&config_path).await;
            }
        }

        // 4. Defaults
        debug!("No configuration file found, using defaults");
        Ok(ToolmanConfig::default())
    }

    /// Try ./toolman.json, then ./.toolman/config.json
    async fn try_load_dir(&self, dir: &Path) -> Result<Option<ToolmanConfig>> {
        let toolman_json = dir.join("toolman.json");
        if toolman_json.exists() {
            return Ok(Some(self.load_file(&toolman_json).await?));
        }

        let toolman_dir_config = dir.join(".toolman").join("config.json");
        if toolman_dir_config.exists() {
            return Ok(Some(self.load_file(&toolman_dir_config).await?));
        }

        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<ToolmanConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<ToolmanConfig> {
        debug!("Loading configuration from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Get the user configuration directory
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}
