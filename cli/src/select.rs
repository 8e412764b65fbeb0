//! Interactive tool selection

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::io::IsTerminal;
use toolman_core::ToolRegistry;

/// Use `tool` if given, otherwise ask on the terminal.
///
/// Returns an empty id when nothing was chosen; the dispatcher rejects it.
pub fn resolve_tool(tool: Option<String>, registry: &ToolRegistry) -> Result<String> {
    if let Some(tool) = tool {
        return Ok(tool);
    }
    if !std::io::stdin().is_terminal() || registry.is_empty() {
        return Ok(String::new());
    }

    let ids = registry.ids();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a tool")
        .items(&ids)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| ids[i].to_string()).unwrap_or_default())
}
