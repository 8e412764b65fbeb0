//! CLI output handler implementation

use async_trait::async_trait;
use console::style;
use std::io::Write;
use toolman_core::output::OutputError;
use toolman_core::runner::OutputStream;
use toolman_core::{Action, ActionEvent, ActionOutput, Outcome};

/// CLI output configuration
#[derive(Debug, Clone)]
pub struct CliOutputConfig {
    /// Print the exact command before it runs
    pub show_commands: bool,
}

impl Default for CliOutputConfig {
    fn default() -> Self {
        Self {
            show_commands: true,
        }
    }
}

/// Renders action events on the terminal.
///
/// Command stdout goes to stdout, command stderr to stderr, and the final
/// notification to stdout on success or stderr on failure.
pub struct CliOutputHandler {
    config: CliOutputConfig,
}

impl CliOutputHandler {
    /// Create a new CLI output handler
    pub fn new(config: CliOutputConfig) -> Self {
        Self { config }
    }
}

impl Default for CliOutputHandler {
    fn default() -> Self {
        Self::new(CliOutputConfig::default())
    }
}

#[async_trait]
impl ActionOutput for CliOutputHandler {
    async fn emit_event(&self, event: ActionEvent) -> Result<(), OutputError> {
        match event {
            ActionEvent::Started {
                action,
                target,
                command,
            } => {
                println!(
                    "\n{}",
                    style(started_message(action, target.as_deref())).bold()
                );
                if self.config.show_commands {
                    println!("{} {}", style("$").dim(), style(command).cyan());
                }
            }

            ActionEvent::Output { line } => match line.stream {
                OutputStream::Stdout => println!("{}", line.text),
                OutputStream::Stderr => eprintln!("{}", style(line.text).yellow()),
            },

            ActionEvent::Finished {
                action,
                target,
                outcome,
            } => {
                let message = finished_message(action, target.as_deref(), outcome);
                if outcome == Outcome::Success {
                    println!("{} {}", style("✔").green().bold(), style(message).green());
                } else {
                    eprintln!("{} {}", style("✘").red().bold(), style(message).red());
                }
            }
        }

        Ok(())
    }

    async fn flush(&self) -> Result<(), OutputError> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

/// Status line printed when a command starts
pub fn started_message(action: Action, target: Option<&str>) -> String {
    match (action, target) {
        (Action::InstallAll, _) => "Installing all tools...".to_string(),
        (_, Some(target)) => format!("{} {}...", action.verb(), target),
        (_, None) => format!("{}...", action.verb()),
    }
}

/// Notification shown once an action has finished
pub fn finished_message(action: Action, target: Option<&str>, outcome: Outcome) -> String {
    let target = target.unwrap_or("tool");
    match (action, outcome) {
        (Action::InstallAll, Outcome::Success) => "All tools installed successfully!".to_string(),
        (Action::InstallAll, _) => "Failed to install some tools".to_string(),
        (Action::Update, Outcome::Success) => format!("{} updated successfully!", target),
        (Action::Update, _) => format!("Failed to update {}", target),
        (Action::CheckVersion, Outcome::Success) => format!("Version check for {} finished", target),
        (Action::CheckVersion, _) => format!("Version check failed for {}", target),
        (_, Outcome::Success) => format!("{} installed successfully!", target),
        (_, Outcome::LaunchFailure) => format!("Installation failed for {}", target),
        (_, Outcome::CommandFailed(_)) => format!("Failed to install {}", target),
    }
}
