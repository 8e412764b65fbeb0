//! Install and update commands

use crate::select::resolve_tool;
use anyhow::Result;
use toolman_core::{ActionDispatcher, ActionOutput};
use tracing::debug;

/// Install one tool
pub async fn install_command(
    dispatcher: &ActionDispatcher,
    tool: Option<String>,
    output: &dyn ActionOutput,
) -> Result<()> {
    let tool = resolve_tool(tool, dispatcher.registry())?;
    let result = dispatcher.install(&tool, output).await?;
    debug!("Install of {} took {}ms", tool, result.duration_ms);
    Ok(())
}

/// Update one tool
pub async fn update_command(
    dispatcher: &ActionDispatcher,
    tool: Option<String>,
    output: &dyn ActionOutput,
) -> Result<()> {
    let tool = resolve_tool(tool, dispatcher.registry())?;
    let result = dispatcher.update(&tool, output).await?;
    debug!("Update of {} took {}ms", tool, result.duration_ms);
    Ok(())
}

/// Install every tool of the active profile at once
pub async fn install_all_command(
    dispatcher: &ActionDispatcher,
    output: &dyn ActionOutput,
) -> Result<()> {
    let result = dispatcher.install_all(output).await?;
    debug!("Install of all tools took {}ms", result.duration_ms);
    Ok(())
}

/// Clone and install the external project
pub async fn install_external_command(
    dispatcher: &ActionDispatcher,
    output: &dyn ActionOutput,
) -> Result<()> {
    let result = dispatcher.install_external_project(output).await?;
    debug!("External project install took {}ms", result.duration_ms);
    Ok(())
}
