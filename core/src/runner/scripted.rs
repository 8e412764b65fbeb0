//! Test double that replays scripted process behaviour

use super::{CommandRunner, CommandSpec, ExecutionResult, OutputLine};
use crate::error::{Error, Result};
use crate::output::{ActionEvent, ActionOutput};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// What a scripted invocation should look like
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Exit { lines: Vec<OutputLine>, code: i32 },
    LaunchFailure,
}

impl Script {
    pub(crate) fn exit(lines: &[&str], code: i32) -> Self {
        Script::Exit {
            lines: lines.iter().map(|l| OutputLine::stdout(*l)).collect(),
            code,
        }
    }
}

/// Records every command it is asked to run and answers from a queue.
/// An empty queue answers with a silent exit 0.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_script(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        self.calls.lock().unwrap().push(spec.clone());
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Script::Exit {
                lines: Vec::new(),
                code: 0,
            });

        match script {
            Script::LaunchFailure => Ok(ExecutionResult::launch_failed(
                spec.display(),
                "No such file or directory".to_string(),
            )),
            Script::Exit { lines, code } => {
                for line in &lines {
                    output
                        .emit_event(ActionEvent::Output { line: line.clone() })
                        .await
                        .map_err(|e| Error::Output(e.to_string()))?;
                }
                Ok(ExecutionResult::completed(spec.display(), Some(code), lines, 0))
            }
        }
    }
}
