//! External process execution
//!
//! The orchestrator never spawns processes directly; it goes through the
//! narrow [`ProcessRunner`] interface so tests can substitute a scripted
//! runner and assert on pipeline transitions without a real npm.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::ProcessError;

/// One external command invocation
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Program name, resolved via PATH
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory for the process
    pub cwd: PathBuf,
    /// Environment variable overrides (merged over the ambient environment)
    pub env: HashMap<String, String>,
    /// Suppress line streaming; output is still captured
    pub quiet: bool,
    /// Kill the process after this long
    pub timeout: Option<Duration>,
}

impl ProcessRequest {
    /// Create a request with no env overrides, streaming enabled, no timeout
    pub fn new(program: impl Into<String>, args: Vec<String>, cwd: PathBuf) -> Self {
        Self {
            program: program.into(),
            args,
            cwd,
            env: HashMap::new(),
            quiet: false,
            timeout: None,
        }
    }

    /// The command line, for logs and error messages
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Result of one external command invocation
///
/// A non-zero exit is an outcome, not an error; callers decide how to
/// escalate it.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    /// Exit code, absent if the process was killed
    pub exit_code: Option<i32>,
    /// Combined stdout and stderr, line-buffered
    pub captured_output: String,
    /// The process was killed after exceeding the timeout
    pub timed_out: bool,
}

impl ProcessOutcome {
    /// Exit code 0 means the step is done
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Narrow interface for executing external commands
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    /// Run one command to completion (or timeout)
    ///
    /// Returns `Err` only when the process could not be started; a process
    /// that ran and failed is reported through the outcome.
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutcome, ProcessError>;
}

/// [`ProcessRunner`] backed by real subprocesses (tokio)
#[derive(Debug, Default, Clone, Copy)]
pub struct NpmRunner;

impl NpmRunner {
    /// Create a new runner
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for NpmRunner {
    async fn run(&self, request: &ProcessRequest) -> Result<ProcessOutcome, ProcessError> {
        // Resolve up front so a missing npm yields an actionable error
        // instead of a bare spawn failure.
        which::which(&request.program).map_err(|_| ProcessError::ToolNotFound {
            program: request.program.clone(),
        })?;

        tracing::debug!("Running `{}` in {}", request.command_line(), request.cwd.display());

        let mut child = tokio::process::Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .envs(&request.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::Spawn {
                program: request.program.clone(),
                error: e.to_string(),
            })?;

        // Reader tasks keep draining the pipes while we wait, so a timeout
        // still hands back whatever output the process produced.
        let stdout_task = tokio::spawn(capture_lines(child.stdout.take(), request.quiet));
        let stderr_task = tokio::spawn(capture_lines(child.stderr.take(), request.quiet));

        let status = match request.timeout {
            Some(duration) => match tokio::time::timeout(duration, child.wait()).await {
                Ok(result) => Some(result.map_err(|e| ProcessError::Io {
                    program: request.program.clone(),
                    error: e.to_string(),
                })?),
                Err(_) => {
                    let _ = child.kill().await;
                    None
                }
            },
            None => Some(child.wait().await.map_err(|e| ProcessError::Io {
                program: request.program.clone(),
                error: e.to_string(),
            })?),
        };

        let timed_out = status.is_none();
        let mut captured = finish_capture(stdout_task, timed_out).await;
        captured.push_str(&finish_capture(stderr_task, timed_out).await);

        match status {
            Some(status) => Ok(ProcessOutcome {
                exit_code: status.code(),
                captured_output: captured,
                timed_out: false,
            }),
            None => Ok(ProcessOutcome {
                exit_code: None,
                captured_output: captured,
                timed_out: true,
            }),
        }
    }
}

/// How long to keep draining the pipes after a timeout kill
const CAPTURE_GRACE: Duration = Duration::from_millis(250);

/// Collect a reader task's captured output
///
/// After a timeout kill the pipes can stay open: a grandchild that
/// inherited them (npm spawns node) outlives the killed direct child. The
/// readers then never see EOF, so they only get a short grace period
/// before being aborted.
async fn finish_capture(mut task: tokio::task::JoinHandle<String>, timed_out: bool) -> String {
    if !timed_out {
        return task.await.unwrap_or_default();
    }
    match tokio::time::timeout(CAPTURE_GRACE, &mut task).await {
        Ok(captured) => captured.unwrap_or_default(),
        Err(_) => {
            task.abort();
            String::new()
        }
    }
}

/// Drain a child pipe line by line, capturing and optionally streaming
async fn capture_lines<R>(pipe: Option<R>, quiet: bool) -> String
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(pipe) = pipe else {
        return String::new();
    };

    let mut lines = BufReader::new(pipe).lines();
    let mut captured = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        if !quiet {
            tracing::info!("{line}");
        }
        captured.push_str(&line);
        captured.push('\n');
    }
    captured
}
