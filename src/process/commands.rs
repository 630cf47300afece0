//! External command execution
//!
//! [`Commands`] runs one external program with a configurable working
//! directory, extra environment, timeout, and result-evaluation policy.
//! Stdout and stderr are drained by [`InMemoryStreamRecorder`]s so the
//! recorded output can be surfaced in errors.

use super::recorder::{InMemoryStreamRecorder, RecorderError};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// How a finished process's exit status is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultEvaluator {
    #[default]
    FailOnNonZeroExitValue,
    IgnoreFailures,
}

/// Outcome of a completed process.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessResult {
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

/// Errors raised while executing an external command.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to write to stdin of '{program}': {source}")]
    Stdin {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[error("Command '{program}' timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("Failed to capture output of '{program}': {source}")]
    Stream {
        program: String,
        source: RecorderError,
    },

    #[error("Command '{program}' exited with code {code}: {stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
    },
}

/// An external command plus its execution policy.
#[derive(Debug, Clone)]
pub struct Commands {
    program: String,
    args: Vec<String>,
    working_directory: Option<PathBuf>,
    environment: BTreeMap<String, String>,
    timeout: Option<Duration>,
    result_evaluator: ResultEvaluator,
}

impl Commands {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_directory: None,
            environment: BTreeMap::new(),
            timeout: None,
            result_evaluator: ResultEvaluator::default(),
        }
    }

    /// Run in the given directory instead of inheriting the current one.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(directory.into());
        self
    }

    /// Augment the inherited environment with an extra entry.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Kill the process and fail if it runs longer than this.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Treat a non-zero exit status as success.
    pub fn ignore_failures(mut self) -> Self {
        self.result_evaluator = ResultEvaluator::IgnoreFailures;
        self
    }

    pub fn execute(&self) -> Result<ProcessResult, ProcessError> {
        self.run(None)
    }

    /// Execute with the given string fed to the process's stdin.
    pub fn execute_with_input(&self, input: &str) -> Result<ProcessResult, ProcessError> {
        self.run(Some(input))
    }

    fn run(&self, input: Option<&str>) -> Result<ProcessResult, ProcessError> {
        debug!(program = %self.program, args = ?self.args, "executing command");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(directory) = &self.working_directory {
            command.current_dir(directory);
        }
        for (key, value) in &self.environment {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if let Some(input) = input {
            // Dropping the handle closes the pipe so the child sees EOF.
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(input.as_bytes())
                    .map_err(|source| ProcessError::Stdin {
                        program: self.program.clone(),
                        source,
                    })?;
            }
        }

        let stdout = child.stdout.take().ok_or_else(|| ProcessError::Spawn {
            program: self.program.clone(),
            source: std::io::Error::other("stdout was not captured"),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| ProcessError::Spawn {
            program: self.program.clone(),
            source: std::io::Error::other("stderr was not captured"),
        })?;

        let recorder = InMemoryStreamRecorder::default();
        let stdout_handle = recorder.record(stdout);
        let stderr_handle = recorder.record(stderr);

        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if let (Some(deadline), Some(timeout)) = (deadline, self.timeout)
                        && Instant::now() >= deadline
                    {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ProcessError::Timeout {
                            program: self.program.clone(),
                            timeout,
                        });
                    }
                    std::thread::sleep(WAIT_POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(ProcessError::Wait {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        };

        let stdout = stdout_handle
            .await_contents(DRAIN_TIMEOUT)
            .map_err(|source| ProcessError::Stream {
                program: self.program.clone(),
                source,
            })?;
        let stderr = stderr_handle
            .await_contents(DRAIN_TIMEOUT)
            .map_err(|source| ProcessError::Stream {
                program: self.program.clone(),
                source,
            })?;

        let exit_code = status.code().unwrap_or(-1);
        debug!(program = %self.program, exit_code, "command finished");

        if exit_code != 0 && self.result_evaluator == ResultEvaluator::FailOnNonZeroExitValue {
            return Err(ProcessError::NonZeroExit {
                program: self.program.clone(),
                code: exit_code,
                stderr,
            });
        }

        Ok(ProcessResult {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout_of_successful_command() {
        let result = Commands::new("sh", ["-c", "echo hello"]).execute().unwrap();

        assert_eq!(result.exit_code(), 0);
        assert_eq!(result.stdout(), "hello");
        assert_eq!(result.stderr(), "");
    }

    #[test]
    fn test_fails_on_non_zero_exit_by_default() {
        let result = Commands::new("sh", ["-c", "echo oops >&2; exit 3"]).execute();

        match result {
            Err(ProcessError::NonZeroExit { code, stderr, .. }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "oops");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[test]
    fn test_ignore_failures_accepts_non_zero_exit() {
        let result = Commands::new("sh", ["-c", "exit 3"])
            .ignore_failures()
            .execute()
            .unwrap();

        assert_eq!(result.exit_code(), 3);
    }

    #[test]
    fn test_times_out_long_running_command() {
        let result = Commands::new("sleep", ["5"])
            .with_timeout(Duration::from_millis(100))
            .execute();

        assert!(matches!(result, Err(ProcessError::Timeout { .. })));
    }

    #[test]
    fn test_feeds_input_to_stdin() {
        let result = Commands::new("cat", Vec::<String>::new())
            .execute_with_input("piped input")
            .unwrap();

        assert_eq!(result.stdout(), "piped input");
    }

    #[test]
    fn test_augments_environment() {
        let result = Commands::new("sh", ["-c", "echo $GRAPH_ETL_TEST_VAR"])
            .with_env("GRAPH_ETL_TEST_VAR", "42")
            .execute()
            .unwrap();

        assert_eq!(result.stdout(), "42");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Commands::new("pwd", Vec::<String>::new())
            .with_working_directory(dir.path())
            .execute()
            .unwrap();

        let reported = PathBuf::from(result.stdout());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let result = Commands::new("definitely-not-a-real-binary", Vec::<String>::new()).execute();

        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }
}
