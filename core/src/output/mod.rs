//! Output abstraction for action events
//!
//! The dispatcher and runners never print. They push [`ActionEvent`]s into an
//! [`ActionOutput`] supplied by the caller, which decides how to render them.

use crate::actions::Action;
use crate::runner::{OutputLine, Outcome};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Error type returned by output sinks
pub type OutputError = Box<dyn std::error::Error + Send + Sync>;

/// Events emitted while an action runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ActionEvent {
    /// A command is about to be executed
    Started {
        action: Action,
        target: Option<String>,
        command: String,
    },

    /// A line of output was read from the running command
    Output { line: OutputLine },

    /// The action reached its final status
    Finished {
        action: Action,
        target: Option<String>,
        outcome: Outcome,
    },
}

/// Consumer of action events
#[async_trait]
pub trait ActionOutput: Send + Sync {
    /// Handle a single event
    async fn emit_event(&self, event: ActionEvent) -> Result<(), OutputError>;

    /// Flush any buffered output
    async fn flush(&self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Output that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

#[async_trait]
impl ActionOutput for NullOutput {
    async fn emit_event(&self, _event: ActionEvent) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Output that keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingOutput {
    events: Mutex<Vec<ActionEvent>>,
}

impl CollectingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events received so far
    pub async fn events(&self) -> Vec<ActionEvent> {
        self.events.lock().await.clone()
    }

    /// Text of every output line received so far
    pub async fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .await
            .iter()
            .filter_map(|event| match event {
                ActionEvent::Output { line } => Some(line.text.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ActionOutput for CollectingOutput {
    async fn emit_event(&self, event: ActionEvent) -> Result<(), OutputError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
