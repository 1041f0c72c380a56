//! Running external tools with a deadline.

use std::ffi::OsStr;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

/// How long to wait for the pipe readers after the child exits
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Cap on captured output per stream (1MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{program} not found in PATH")]
    NotFound { program: String },
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Result of a command that was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed {
        success: bool,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// Killed after the deadline passed
    TimedOut,
}

/// Resolve `program` on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf, RunError> {
    which::which(program).map_err(|_| RunError::NotFound {
        program: program.to_string(),
    })
}

/// Run `program` with `args`, killing it if it outlives `timeout`.
///
/// stdout and stderr are drained on separate threads while waiting, so a
/// chatty child cannot fill a pipe and stall.
pub fn run_with_timeout<I, S>(
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<CommandOutcome, RunError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let resolved = resolve_program(program)?;
    let mut child = Command::new(&resolved)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => RunError::NotFound {
                program: program.to_string(),
            },
            _ => RunError::Spawn {
                program: program.to_string(),
                source,
            },
        })?;

    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let status = child
        .wait_timeout(timeout)
        .map_err(|source| RunError::Wait {
            program: program.to_string(),
            source,
        })?;

    let Some(status) = status else {
        tracing::debug!(program, timeout_secs = timeout.as_secs(), "killing timed out command");
        kill_child_process(&mut child);
        return Ok(CommandOutcome::TimedOut);
    };

    let stdout = stdout_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();
    let stderr = stderr_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();

    Ok(CommandOutcome::Completed {
        success: status.success(),
        code: status.code(),
        stdout,
        stderr,
    })
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_to_string(stream));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Read a stream to EOF, keeping at most [`MAX_OUTPUT_SIZE`] bytes.
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                buf.extend_from_slice(&chunk[..n.min(remaining)]);
            }
            Err(_) => break,
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn kill_child_process(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
