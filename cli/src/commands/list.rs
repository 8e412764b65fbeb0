//! Tools listing command

use anyhow::Result;
use console::style;
use serde::Serialize;
use toolman_core::ActionDispatcher;
use tracing::info;

#[derive(Debug, Serialize)]
struct ListedTool<'a> {
    id: &'a str,
    package: &'a str,
    install_command: String,
    installed: bool,
}

/// Show available tools
pub async fn list_command(dispatcher: &ActionDispatcher, json: bool) -> Result<()> {
    info!("Listing available tools");

    let tools: Vec<ListedTool<'_>> = dispatcher
        .list()?
        .iter()
        .map(|entry| ListedTool {
            id: &entry.id,
            package: &entry.package,
            install_command: entry.install_command.display(),
            installed: entry.is_on_path(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!(
        "Available {}:\n",
        style(dispatcher.profile().kind.title()).bold()
    );

    let width = tools.iter().map(|t| t.id.len()).max().unwrap_or(0);
    for tool in &tools {
        let marker = if tool.installed {
            style("✔").green()
        } else {
            style("·").dim()
        };
        println!(
            "{} {:width$} → {}",
            marker,
            tool.id,
            style(&tool.install_command).dim(),
            width = width
        );
    }

    println!(
        "\n{} installed, {} available",
        tools.iter().filter(|t| t.installed).count(),
        tools.len()
    );

    Ok(())
}
