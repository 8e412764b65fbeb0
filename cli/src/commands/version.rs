//! Version check command

use crate::select::resolve_tool;
use anyhow::Result;
use console::style;
use toolman_core::ActionDispatcher;

/// Print the first line of a tool's version output.
///
/// With `dry_run` the version command is shown instead of being run.
pub async fn version_command(
    dispatcher: &ActionDispatcher,
    tool: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let tool = resolve_tool(tool, dispatcher.registry())?;

    if dry_run {
        let spec = dispatcher.version_check_command(&tool)?;
        println!("would run: {}", spec);
        return Ok(());
    }

    let version = dispatcher.check_version(&tool).await?;
    println!("{} {}", style(format!("{}:", tool)).bold(), version);
    Ok(())
}
