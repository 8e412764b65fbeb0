//! CLI command implementations

pub mod install;
pub mod list;
pub mod version;

pub use install::{install_all_command, install_command, install_external_command, update_command};
pub use list::list_command;
pub use version::version_command;

use toolman_core::error::{ActionError, RegistryError, RunnerError};

/// Exit code reserved for commands that could not be started
pub const LAUNCH_FAILURE_EXIT_CODE: u8 = 127;

/// Map a failed command to the process exit code.
///
/// A failed command passes its own exit code through; anything else is 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<toolman_core::Error>() {
        Some(toolman_core::Error::Runner(RunnerError::LaunchFailure { .. })) => {
            LAUNCH_FAILURE_EXIT_CODE
        }
        Some(toolman_core::Error::Runner(RunnerError::CommandFailed { exit_code, .. })) => {
            u8::try_from(*exit_code)
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1)
        }
        _ => 1,
    }
}

/// Hint printed under an error notification
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<toolman_core::Error>()? {
        toolman_core::Error::Registry(RegistryError::NotFound { .. }) => {
            Some("Run `toolman list` to see the available tools.")
        }
        toolman_core::Error::Action(ActionError::NoToolSelected) => {
            Some("Pass a tool name, e.g. `toolman install ngspice`.")
        }
        toolman_core::Error::Action(ActionError::UnsupportedAction { .. }) => {
            Some("Choose another profile with --profile.")
        }
        toolman_core::Error::Runner(RunnerError::LaunchFailure { .. }) => {
            Some("Check that the program is installed and on PATH.")
        }
        _ => None,
    }
}
