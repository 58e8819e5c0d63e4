//! External process invocation.
//!
//! One interface covers both ways the pipeline runs external tools:
//!
//! - [`InvokeMode::Blocking`]: suspend until the child terminates and hand
//!   back its captured stdout/stderr with the exit code. Used for the scope
//!   parser, whose output files gate everything downstream.
//! - [`InvokeMode::Streaming`]: spawn the child, forward its stdout/stderr
//!   line-by-line into the log sink as they arrive, and resolve exactly once
//!   with the exit code when the process exits. Used for the long-running
//!   crawlers, where the operator needs incremental visibility.
//!
//! Both modes return the same [`ProcessOutput`] shape. A non-zero exit code
//! is *not* an `Err` here; interpreting it is the stage's job. Only a failure
//! to start the process at all surfaces as [`PipelineError::Spawn`].

use crate::error::PipelineError;
use crate::models::ProcessOutput;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// One external program invocation: a program path and its ordered arguments.
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    /// Program or interpreter to execute.
    pub program: String,
    /// Ordered argument list handed to the program.
    pub args: Vec<String>,
}

impl ExternalCommand {
    /// Build a command from a program and its arguments.
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// How an invocation interacts with the calling stage.
#[derive(Debug, Clone, Copy)]
pub enum InvokeMode {
    /// Wait for termination, capture stdout/stderr in full.
    Blocking,
    /// Forward output line-by-line to the log sink under this stream tag.
    Streaming {
        /// Tag attached to every forwarded log line (e.g. `"twitter-crawl"`).
        stream: &'static str,
    },
}

/// Run an external command under the given mode.
///
/// # Errors
///
/// Returns [`PipelineError::Spawn`] when the process cannot be started at
/// all (bad path, permissions). Waiting on an already-started child can fail
/// with [`PipelineError::Io`]. A child that starts and exits non-zero is a
/// successful invocation; its code is reported in the returned
/// [`ProcessOutput`].
#[instrument(level = "info", skip_all, fields(program = %command.program, mode = ?mode))]
pub async fn invoke(
    command: &ExternalCommand,
    mode: InvokeMode,
) -> Result<ProcessOutput, PipelineError> {
    match mode {
        InvokeMode::Blocking => invoke_blocking(command).await,
        InvokeMode::Streaming { stream } => invoke_streaming(command, stream).await,
    }
}

/// Wait for the child and capture both streams in full.
async fn invoke_blocking(command: &ExternalCommand) -> Result<ProcessOutput, PipelineError> {
    let output = Command::new(&command.program)
        .args(&command.args)
        .output()
        .await
        .map_err(|source| PipelineError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let result = ProcessOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    info!(code = ?result.code, "Blocking invocation finished");
    Ok(result)
}

/// Spawn the child with piped stdio and forward its output as it arrives.
///
/// The returned future resolves only after the process has exited and both
/// stream readers have drained, so the completion is observed exactly once.
async fn invoke_streaming(
    command: &ExternalCommand,
    stream: &'static str,
) -> Result<ProcessOutput, PipelineError> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PipelineError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let stdout_task = child
        .stdout
        .take()
        .map(|out| tokio::spawn(forward_lines(out, stream, false)));
    let stderr_task = child
        .stderr
        .take()
        .map(|err| tokio::spawn(forward_lines(err, stream, true)));

    let status = child.wait().await?;

    // Drain both readers before reporting; the pipes close at process exit.
    if let Some(task) = stdout_task {
        let _ = task.await;
    }
    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    info!(stream, code = ?status.code(), "Child exited");
    Ok(ProcessOutput {
        code: status.code(),
        stdout: String::new(),
        stderr: String::new(),
    })
}

/// Forward each line from a child pipe into the log sink.
async fn forward_lines<R>(reader: R, stream: &'static str, is_stderr: bool)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if is_stderr {
            warn!(stream, "{line}");
        } else {
            info!(stream, "{line}");
        }
    }
}
