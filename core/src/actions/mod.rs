//! User-facing actions and their dispatcher

pub mod dispatcher;

pub use dispatcher::ActionDispatcher;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the operations a profile can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    List,
    Install,
    Update,
    CheckVersion,
    InstallAll,
    InstallExternal,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::List,
        Action::Install,
        Action::Update,
        Action::CheckVersion,
        Action::InstallAll,
        Action::InstallExternal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Install => "install",
            Action::Update => "update",
            Action::CheckVersion => "version",
            Action::InstallAll => "install-all",
            Action::InstallExternal => "install-external",
        }
    }

    /// Progressive verb for status lines, e.g. "Installing"
    pub fn verb(&self) -> &'static str {
        match self {
            Action::List => "Listing",
            Action::Install => "Installing",
            Action::Update => "Updating",
            Action::CheckVersion => "Checking version of",
            Action::InstallAll => "Installing all tools",
            Action::InstallExternal => "Installing",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
