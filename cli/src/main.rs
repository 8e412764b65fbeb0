//! # toolman CLI
//!
//! Command-line interface for toolman - install, update and version-check
//! development and eSim tools through the system package manager.
//!
//! ## Usage
//!
//! - `toolman list` - Show the tools of the active profile
//! - `toolman install ngspice` - Install one tool
//! - `toolman update git` - Upgrade one tool
//! - `toolman version gcc` - Print a tool's version
//! - `toolman install-all` - Install every tool in one package-manager run
//! - `toolman install-esim` - Clone eSim and run its installer
//!
//! Package-manager commands run through `sudo`. Use a passwordless sudo rule
//! or authenticate first (`sudo -v`); toolman does not handle privilege
//! escalation itself.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use toolman_core::{
    ActionDispatcher, CommandRunner, DryRunRunner, ProcessRunner, Profile, ProfileKind,
};
use tracing::debug;

mod commands;
mod config;
mod output;
mod select;

use commands::{
    exit_code_for, hint_for, install_all_command, install_command, install_external_command,
    list_command, update_command, version_command,
};
use config::CliConfigLoader;
use output::{CliOutputConfig, CliOutputHandler};

/// toolman - install and manage development and eSim tools
#[derive(Parser)]
#[command(name = "toolman")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Install, update and version-check development and eSim tools")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tool profile (dev, esim, all)
    #[arg(short, long, global = true, env = "TOOLMAN_PROFILE")]
    profile: Option<ProfileKind>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Run the package manager without sudo
    #[arg(long, global = true, env = "TOOLMAN_NO_SUDO")]
    no_sudo: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show command output and the final result
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show available tools
    List {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install a tool
    Install {
        /// Tool to install (prompted for when omitted)
        tool: Option<String>,
    },

    /// Update an installed tool
    Update {
        /// Tool to update (prompted for when omitted)
        tool: Option<String>,
    },

    /// Show the installed version of a tool
    Version {
        /// Tool to check (prompted for when omitted)
        tool: Option<String>,
    },

    /// Install every tool of the profile at once
    InstallAll,

    /// Clone eSim and run its installer
    #[command(name = "install-esim")]
    InstallEsim,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_no_sudo(cli.no_sudo);

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(profile) = cli.profile {
        loader = loader.with_profile_override(profile);
    }

    loader
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr, RUST_LOG wins when set
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), err);
            if let Some(hint) = hint_for(&err) {
                eprintln!("{} {}", style("hint:").dim(), hint);
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config_loader(&cli).load().await?;
    let profile = Profile::from_config(&config)?;
    debug!(
        "Using profile '{}' with {} tools",
        profile.kind,
        profile.registry.len()
    );

    let runner: Arc<dyn CommandRunner> = if cli.dry_run {
        Arc::new(DryRunRunner)
    } else {
        Arc::new(ProcessRunner::new())
    };
    let dispatcher = ActionDispatcher::new(profile, runner);

    let output = CliOutputHandler::new(CliOutputConfig {
        show_commands: !cli.quiet,
    });

    match cli.command {
        Commands::List { json } => list_command(&dispatcher, json).await,
        Commands::Install { tool } => install_command(&dispatcher, tool, &output).await,
        Commands::Update { tool } => update_command(&dispatcher, tool, &output).await,
        Commands::Version { tool } => version_command(&dispatcher, tool, cli.dry_run).await,
        Commands::InstallAll => install_all_command(&dispatcher, &output).await,
        Commands::InstallEsim => install_external_command(&dispatcher, &output).await,
    }
}
