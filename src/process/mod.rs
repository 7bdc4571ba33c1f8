//! External command execution with deadlines
//!
//! Every `git`, `gh` and hook invocation goes through this module so the
//! timeout policy is the same everywhere:
//! - the wait is a blocking timed wait (`wait_timeout`), not a polling loop
//! - on expiry the child's process tree is terminated and the child is reaped
//! - the reap is bounded by [`REAP_GRACE`], and draining both output pipes
//!   shares one further [`REAP_GRACE`] deadline
//!
//! Captured commands lead their own process group on Unix, so a timeout also
//! kills anything they spawned. [`run_with_progress`] stays in the caller's
//! group: it is attached to the terminal, where Ctrl-C and credential prompts
//! must reach the child.
//!
//! Timeouts surface as [`Error::ToolTimeout`], non-zero exits as
//! [`Error::ToolExecution`], so callers can treat them differently.

mod tree;

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::{Error, Result};

pub use tree::{spawn_in_new_process_group, terminate_process_tree};

/// Extra time allowed after the deadline for the killed child to be reaped
/// and for its output pipes to drain
pub const REAP_GRACE: Duration = Duration::from_secs(3);

/// Run `program` with `args` and return its trimmed stdout.
///
/// `dir` of `None` runs in the caller's current directory. On a non-zero exit
/// the error carries the joined command line and the trimmed stderr (or the
/// exit status text when stderr is empty).
pub fn run_command(
    dir: Option<&Path>,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String> {
    let command_line = format_command(program, args);
    debug!(command = %command_line, dir = ?dir, timeout_secs = timeout.as_secs(), "Running command");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let mut child = spawn_in_new_process_group(&mut cmd).map_err(|source| Error::Spawn {
        program: program.to_string(),
        source,
    })?;

    // Drain both pipes while waiting; a child blocked on a full pipe would
    // otherwise never exit.
    let stdout_rx = drain_in_background(child.stdout.take());
    let stderr_rx = drain_in_background(child.stderr.take());

    let status = wait_with_deadline(&mut child, timeout, &command_line)?;

    let drain_deadline = Instant::now() + REAP_GRACE;
    let stdout = recv_until(&stdout_rx, drain_deadline);
    let stderr = recv_until(&stderr_rx, drain_deadline);

    let status = match status {
        Some(status) => status,
        None => {
            debug!(command = %command_line, "Command timed out");
            return Err(Error::ToolTimeout {
                command: command_line,
                timeout,
            });
        }
    };

    if !status.success() {
        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            status.to_string()
        } else {
            stderr.to_string()
        };
        debug!(command = %command_line, %status, "Command failed");
        return Err(Error::ToolExecution {
            command: command_line,
            stderr: message,
        });
    }

    Ok(stdout.trim().to_string())
}

/// Run `program` with its stdout/stderr connected to this process's terminal.
///
/// Used for long operations (clone, fetch) where the user should see
/// progress. Nothing is captured; failures carry only the exit status.
pub fn run_with_progress(
    dir: Option<&Path>,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<()> {
    let command_line = format_command(program, args);
    debug!(command = %command_line, dir = ?dir, timeout_secs = timeout.as_secs(), "Running command with progress");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    // Stays in the caller's process group so terminal signals reach it
    let mut child = cmd.spawn().map_err(|source| Error::Spawn {
        program: program.to_string(),
        source,
    })?;

    match wait_with_deadline(&mut child, timeout, &command_line)? {
        Some(status) if status.success() => Ok(()),
        Some(status) => Err(Error::ToolExecution {
            command: command_line,
            stderr: format!("failed ({status})"),
        }),
        None => Err(Error::ToolTimeout {
            command: command_line,
            timeout,
        }),
    }
}

/// Wait for `child` until `timeout` elapses.
///
/// Returns `Ok(None)` on timeout, after the process tree has been terminated
/// and the child reaped (bounded by [`REAP_GRACE`]).
pub(crate) fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
    command_line: &str,
) -> Result<Option<ExitStatus>> {
    let waited = child.wait_timeout(timeout).map_err(|source| Error::Spawn {
        program: command_line.to_string(),
        source,
    })?;

    if let Some(status) = waited {
        return Ok(Some(status));
    }

    terminate_process_tree(child);
    match child.wait_timeout(REAP_GRACE) {
        Ok(Some(_)) => {}
        Ok(None) => warn!(command = %command_line, "Killed process was not reaped within grace period"),
        Err(e) => warn!(command = %command_line, error = %e, "Failed to reap killed process"),
    }

    Ok(None)
}

fn drain_in_background<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(mut stream) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stream.read_to_end(&mut buf);
                let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Collected pipe output, or empty if the reader misses `deadline`.
fn recv_until(rx: &mpsc::Receiver<String>, deadline: Instant) -> String {
    rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
        .unwrap_or_default()
}

fn format_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}
