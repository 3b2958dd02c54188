//! Running the tool under test as a child process.
//!
//! The tool is invoked as `<tool> [leading args] <input> <compressed>
//! <decoded>` with stdin closed and both output streams captured. Each
//! stream is drained on its own thread so a chatty tool can never block on a
//! full pipe while the harness waits for it to exit.
//!
//! Without a timeout the wait is unbounded. With one, the child is polled
//! every [`POLL_INTERVAL`] and killed once the limit elapses.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use thiserror::Error;

use crate::config::POLL_INTERVAL;

/// How long to wait for pipe readers after killing a timed-out child.
/// A grandchild that inherited the pipes can keep them open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Failures that prevent the tool from producing any result at all.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("cannot run {}: {source}", .tool.display())]
    Spawn {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for {}: {source}", .tool.display())]
    Wait {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What the child left behind.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `None` when the process was ended by a signal (including our own kill).
    pub exit_code: Option<i32>,
    pub success: bool,
    pub timed_out: bool,
    pub stdout: String,
    pub stderr: String,
    /// Wall-clock time from spawn to exit, measured by the harness.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Out,
    Err,
}

fn spawn_reader<R>(mut pipe: R, stream: Stream, tx: crossbeam_channel::Sender<(Stream, Vec<u8>)>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        // A read error just truncates what we captured.
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send((stream, buf));
    });
}

fn wait_bounded(child: &mut Child, limit: Duration) -> io::Result<(ExitStatus, bool)> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, false));
        }
        if start.elapsed() >= limit {
            // The child may exit between try_wait and kill; that is fine.
            let _ = child.kill();
            let status = child.wait()?;
            return Ok((status, true));
        }
        thread::sleep(POLL_INTERVAL.min(limit.saturating_sub(start.elapsed())));
    }
}

fn collect(rx: &Receiver<(Stream, Vec<u8>)>, grace: Option<Duration>) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    for _ in 0..2 {
        let received = match grace {
            Some(g) => rx.recv_timeout(g),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok((Stream::Out, bytes)) => out = bytes,
            Ok((Stream::Err, bytes)) => err = bytes,
            Err(_) => break,
        }
    }
    (
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

/// Run `tool leading_args... input compressed decoded` and wait for it.
///
/// A non-zero exit is *not* an error here; it is reported through
/// [`ToolOutput::success`] so the caller can surface the captured stderr.
pub fn invoke_tool(
    tool: &Path,
    leading_args: &[OsString],
    input: &Path,
    compressed: &Path,
    decoded: &Path,
    timeout: Option<Duration>,
) -> Result<ToolOutput, InvokeError> {
    let start = Instant::now();
    let mut child = Command::new(tool)
        .args(leading_args)
        .arg(input)
        .arg(compressed)
        .arg(decoded)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| InvokeError::Spawn {
            tool: tool.to_path_buf(),
            source,
        })?;

    let (tx, rx) = unbounded();
    if let Some(pipe) = child.stdout.take() {
        spawn_reader(pipe, Stream::Out, tx.clone());
    }
    if let Some(pipe) = child.stderr.take() {
        spawn_reader(pipe, Stream::Err, tx.clone());
    }
    drop(tx);

    let waited = match timeout {
        Some(limit) => wait_bounded(&mut child, limit),
        None => child.wait().map(|s| (s, false)),
    };
    let (status, timed_out) = waited.map_err(|source| InvokeError::Wait {
        tool: tool.to_path_buf(),
        source,
    })?;
    let elapsed = start.elapsed();

    let (stdout, stderr) = collect(&rx, timed_out.then_some(DRAIN_GRACE));

    Ok(ToolOutput {
        exit_code: status.code(),
        success: status.success() && !timed_out,
        timed_out,
        stdout,
        stderr,
        elapsed,
    })
}
