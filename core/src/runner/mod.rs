//! Command execution
//!
//! Commands are always described as a program plus an argument list
//! ([`CommandSpec`]); nothing is handed to a shell. A [`CommandRunner`]
//! executes one command, forwards each output line to an [`ActionOutput`] as
//! soon as it is read, and returns an [`ExecutionResult`] once the process
//! has exited.

pub mod command;
pub mod dry_run;
pub mod process;
pub mod result;

#[cfg(test)]
pub(crate) mod scripted;

pub use command::CommandSpec;
pub use dry_run::DryRunRunner;
pub use process::{CommandStream, ProcessRunner};
pub use result::{ExecutionResult, Outcome, OutputLine, OutputStream};

use crate::error::Result;
use crate::output::ActionOutput;
use async_trait::async_trait;

/// Executes commands and streams their output
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `spec` to completion.
    ///
    /// A process that cannot be started is reported through
    /// [`ExecutionResult::failed_to_start`], not as an `Err`. Errors are
    /// reserved for broken pipes and failing output sinks.
    async fn run(&self, spec: &CommandSpec, output: &dyn ActionOutput) -> Result<ExecutionResult>;
}
