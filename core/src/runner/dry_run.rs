//! Runner that reports commands instead of executing them

use super::{CommandRunner, CommandSpec, ExecutionResult, OutputLine};
use crate::error::{Error, Result};
use crate::output::{ActionEvent, ActionOutput};
use async_trait::async_trait;
use tracing::info;

/// Prints each command and reports success without spawning anything
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

#[async_trait]
impl CommandRunner for DryRunRunner {
    async fn run(&self, spec: &CommandSpec, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        info!("Dry run, not executing: {}", spec);

        let mut text = format!("would run: {}", spec);
        if let Some(dir) = &spec.current_dir {
            text.push_str(&format!(" (in {})", dir.display()));
        }
        let line = OutputLine::stdout(text);
        output
            .emit_event(ActionEvent::Output { line: line.clone() })
            .await
            .map_err(|e| Error::Output(e.to_string()))?;

        Ok(ExecutionResult::completed(spec.display(), Some(0), vec![line], 0))
    }
}
