//! Execution results and streamed output lines

use crate::error::RunnerError;
use serde::{Deserialize, Serialize};

/// Which pipe a line was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// A single line of process output, without its trailing newline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout<S: Into<String>>(text: S) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr<S: Into<String>>(text: S) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }
}

/// Final status of one command invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    CommandFailed(i32),
    LaunchFailure,
}

/// Result of running one command. Produced once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Rendered command line that was run
    pub command: String,

    /// Exit code, `None` if the process never started or was killed by a signal
    pub exit_code: Option<i32>,

    /// Every line observed, in delivery order
    pub lines: Vec<OutputLine>,

    /// Whether the process could not be started
    pub failed_to_start: bool,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,

    /// Launch error message when `failed_to_start` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_error: Option<String>,
}

impl ExecutionResult {
    /// Result for a process that ran to completion
    pub fn completed(
        command: String,
        exit_code: Option<i32>,
        lines: Vec<OutputLine>,
        duration_ms: u64,
    ) -> Self {
        Self {
            command,
            exit_code,
            lines,
            failed_to_start: false,
            duration_ms,
            launch_error: None,
        }
    }

    /// Result for a process that could not be spawned
    pub fn launch_failed(command: String, message: String) -> Self {
        Self {
            command,
            exit_code: None,
            lines: Vec::new(),
            failed_to_start: true,
            duration_ms: 0,
            launch_error: Some(message),
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.failed_to_start {
            return Outcome::LaunchFailure;
        }
        match self.exit_code {
            Some(0) => Outcome::Success,
            Some(code) => Outcome::CommandFailed(code),
            // Killed by a signal
            None => Outcome::CommandFailed(-1),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome() == Outcome::Success
    }

    /// Text of every line, in delivery order
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// First non-blank stdout line, falling back to the first non-blank
    /// stderr line
    pub fn first_line(&self) -> Option<&str> {
        let mut printed = self.lines.iter().filter(|l| !l.text.trim().is_empty());
        printed
            .clone()
            .find(|l| l.stream == OutputStream::Stdout)
            .or_else(|| printed.next())
            .map(|l| l.text.as_str())
    }

    /// Convert a failed outcome into the matching runner error
    pub fn into_checked(self) -> std::result::Result<Self, RunnerError> {
        match self.outcome() {
            Outcome::Success => Ok(self),
            Outcome::CommandFailed(exit_code) => Err(RunnerError::CommandFailed {
                command: self.command,
                exit_code,
            }),
            Outcome::LaunchFailure => Err(RunnerError::LaunchFailure {
                command: self.command,
                message: self.launch_error.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_mapping() {
        let ok = ExecutionResult::completed("true".into(), Some(0), vec![], 1);
        assert_eq!(ok.outcome(), Outcome::Success);

        let failed = ExecutionResult::completed("false".into(), Some(1), vec![], 1);
        assert_eq!(failed.outcome(), Outcome::CommandFailed(1));

        let killed = ExecutionResult::completed("sleep 9".into(), None, vec![], 1);
        assert_eq!(killed.outcome(), Outcome::CommandFailed(-1));

        let missing = ExecutionResult::launch_failed("nope".into(), "not found".into());
        assert_eq!(missing.outcome(), Outcome::LaunchFailure);
    }

    #[test]
    fn test_first_line_prefers_stdout() {
        let result = ExecutionResult::completed(
            "python --version".into(),
            Some(0),
            vec![
                OutputLine::stderr("warning: something"),
                OutputLine::stdout("Python 3.12.1"),
                OutputLine::stdout("extra"),
            ],
            5,
        );
        assert_eq!(result.first_line(), Some("Python 3.12.1"));

        let stderr_only = ExecutionResult::completed(
            "python2 --version".into(),
            Some(0),
            vec![OutputLine::stderr("Python 2.7.18")],
            5,
        );
        assert_eq!(stderr_only.first_line(), Some("Python 2.7.18"));

        let leading_blank = ExecutionResult::completed(
            "foo --version".into(),
            Some(0),
            vec![
                OutputLine::stdout(""),
                OutputLine::stdout("  "),
                OutputLine::stdout("Foo 1.0"),
            ],
            5,
        );
        assert_eq!(leading_blank.first_line(), Some("Foo 1.0"));

        let blank = ExecutionResult::completed(
            "foo --version".into(),
            Some(0),
            vec![OutputLine::stdout("")],
            5,
        );
        assert_eq!(blank.first_line(), None);
    }

    #[test]
    fn test_into_checked() {
        let failed = ExecutionResult::completed("apt".into(), Some(100), vec![], 1);
        assert_eq!(
            failed.into_checked(),
            Err(RunnerError::CommandFailed {
                command: "apt".into(),
                exit_code: 100
            })
        );

        let missing = ExecutionResult::launch_failed("nope".into(), "No such file".into());
        assert!(matches!(
            missing.into_checked(),
            Err(RunnerError::LaunchFailure { .. })
        ));
    }
}
