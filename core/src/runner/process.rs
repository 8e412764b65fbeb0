//! Subprocess runner backed by tokio

use super::{CommandRunner, CommandSpec, ExecutionResult, OutputLine, OutputStream};
use crate::error::{Error, Result, RunnerError};
use crate::output::{ActionEvent, ActionOutput};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Start `spec` and return a handle over its output lines.
    ///
    /// stdout and stderr are each drained by their own task into one channel,
    /// so a full pipe never stalls the child while the caller is busy.
    pub fn spawn(&self, spec: &CommandSpec) -> std::result::Result<CommandStream, RunnerError> {
        let command = spec.display();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }

        // stdin stays attached so `sudo` can prompt on the terminal
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| RunnerError::LaunchFailure {
            command: command.clone(),
            message: e.to_string(),
        })?;
        debug!("Spawned `{}` (pid {:?})", command, child.id());

        let (tx, receiver) = mpsc::unbounded_channel();
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(stdout, OutputStream::Stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(stderr, OutputStream::Stderr, tx);
        }

        Ok(CommandStream {
            command,
            child,
            receiver,
            lines: Vec::new(),
            started: Instant::now(),
        })
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec, output: &dyn ActionOutput) -> Result<ExecutionResult> {
        info!("Executing command: {}", spec);

        let mut stream = match self.spawn(spec) {
            Ok(stream) => stream,
            Err(RunnerError::LaunchFailure { command, message }) => {
                warn!("Failed to launch `{}`: {}", command, message);
                return Ok(ExecutionResult::launch_failed(command, message));
            }
            Err(e) => return Err(e.into()),
        };

        // The child always runs to exit, even once forwarding has failed
        let mut failure: Option<Error> = None;
        loop {
            match stream.next_line().await {
                Ok(Some(line)) => {
                    if failure.is_some() {
                        continue;
                    }
                    if let Err(e) = output.emit_event(ActionEvent::Output { line }).await {
                        warn!(
                            "Output sink failed, waiting for `{}` to exit: {}",
                            stream.command(),
                            e
                        );
                        failure = Some(Error::Output(e.to_string()));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read output of `{}`: {}", stream.command(), e);
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(err) = failure {
            match stream.finish().await {
                Ok(result) => debug!(
                    "`{}` exited with {:?} after an output failure",
                    result.command, result.exit_code
                ),
                Err(e) => warn!("Failed to wait for child process: {}", e),
            }
            return Err(err);
        }

        let result = stream.finish().await?;
        debug!(
            "`{}` exited with {:?} after {}ms",
            result.command, result.exit_code, result.duration_ms
        );
        Ok(result)
    }
}

/// Output of a running command, consumed line by line.
///
/// Lines arrive in the order each pipe produced them. The stream is finite
/// and cannot be restarted; run the command again for a fresh one.
/// Dropping the stream before [`finish`](Self::finish) kills the child.
pub struct CommandStream {
    command: String,
    child: Child,
    receiver: mpsc::UnboundedReceiver<std::io::Result<OutputLine>>,
    lines: Vec<OutputLine>,
    started: Instant,
}

impl CommandStream {
    /// Rendered command line
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Next output line, or `None` once both pipes are closed
    pub async fn next_line(&mut self) -> Result<Option<OutputLine>> {
        match self.receiver.recv().await {
            Some(Ok(line)) => {
                self.lines.push(line.clone());
                Ok(Some(line))
            }
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Drain any unread output, wait for exit and build the result
    pub async fn finish(mut self) -> Result<ExecutionResult> {
        while self.next_line().await?.is_some() {}

        let status = self.child.wait().await?;
        let duration_ms = self.started.elapsed().as_millis() as u64;

        Ok(ExecutionResult::completed(
            self.command,
            status.code(),
            self.lines,
            duration_ms,
        ))
    }
}

fn spawn_reader<R>(
    reader: R,
    stream: OutputStream,
    tx: mpsc::UnboundedSender<std::io::Result<OutputLine>>,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&buf)
                        .trim_end_matches(['\n', '\r'])
                        .to_string();
                    if tx.send(Ok(OutputLine { stream, text })).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });
}
