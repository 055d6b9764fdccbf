//! Spawning host tools and collecting what they print.

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

use crate::io::toolchain::{ToolOutcome, ToolRequest};

/// What was kept from one output stream of a tool.
#[derive(Debug, Default, PartialEq, Eq)]
struct Captured {
    kept: Vec<u8>,
    dropped: u64,
}

impl Captured {
    /// Keep the first `limit` bytes of `reader`, then drain the rest and count it.
    fn drain<R: Read>(mut reader: R, limit: usize) -> io::Result<Self> {
        let mut kept = Vec::new();
        reader.by_ref().take(limit as u64).read_to_end(&mut kept)?;
        let dropped = io::copy(&mut reader, &mut io::sink())?;
        Ok(Self { kept, dropped })
    }

    /// Lossy UTF-8 text, ending with a note when bytes were dropped.
    fn into_text(self, stream: &str) -> String {
        let mut text = String::from_utf8_lossy(&self.kept).into_owned();
        if self.dropped > 0 {
            text.push_str(&format!("\n[{stream} truncated {} bytes]\n", self.dropped));
        }
        text
    }
}

/// Run `request.argv` in `request.workdir` with stdin closed.
///
/// stdout and stderr are drained on scoped threads while the main thread waits,
/// so a tool that prints a lot cannot stall on a full pipe. A tool still running
/// after `request.timeout` is killed and reported as timed out.
#[instrument(skip_all, fields(workdir = %request.workdir.display(), timeout_secs = request.timeout.as_secs()))]
pub fn run_tool(request: &ToolRequest) -> Result<ToolOutcome> {
    let (program, args) = request
        .argv
        .split_first()
        .ok_or_else(|| anyhow!("tool command must be non-empty"))?;

    debug!(program = %program, ?args, "spawning tool");
    let mut child = Command::new(program)
        .args(args)
        .current_dir(&request.workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawn {program} in {}", request.workdir.display()))?;

    let stdout = child.stdout.take().context("tool stdout was not piped")?;
    let stderr = child.stderr.take().context("tool stderr was not piped")?;
    let limit = request.output_limit_bytes;

    thread::scope(|scope| -> Result<ToolOutcome> {
        let stdout = scope.spawn(move || Captured::drain(stdout, limit));
        let stderr = scope.spawn(move || Captured::drain(stderr, limit));

        let waited = child.wait_timeout(request.timeout).context("wait for tool")?;
        let (status, timed_out) = match waited {
            Some(status) => (status, false),
            None => {
                warn!(program = %program, "tool timed out, killing");
                child.kill().context("kill tool")?;
                (child.wait().context("reap killed tool")?, true)
            }
        };

        let outcome = ToolOutcome {
            exit_code: status.code(),
            stdout: finish_stream(stdout, "stdout")?,
            stderr: finish_stream(stderr, "stderr")?,
            timed_out,
        };
        debug!(exit_code = ?outcome.exit_code, timed_out, "tool finished");
        Ok(outcome)
    })
}

fn finish_stream(
    handle: thread::ScopedJoinHandle<'_, io::Result<Captured>>,
    stream: &str,
) -> Result<String> {
    let captured = handle
        .join()
        .map_err(|_| anyhow!("{stream} reader panicked"))?
        .with_context(|| format!("read tool {stream}"))?;
    if captured.dropped > 0 {
        warn!(stream, dropped = captured.dropped, "tool output truncated");
    }
    Ok(captured.into_text(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request(argv: &[&str], timeout: Duration, limit: usize) -> ToolRequest {
        ToolRequest {
            workdir: std::env::temp_dir(),
            argv: argv.iter().map(|arg| arg.to_string()).collect(),
            timeout,
            output_limit_bytes: limit,
        }
    }

    #[test]
    fn drain_keeps_prefix_and_counts_rest() {
        let captured = Captured::drain(&b"hello world"[..], 5).expect("drain");
        assert_eq!(captured.kept, b"hello");
        assert_eq!(captured.dropped, 6);
        assert_eq!(captured.into_text("stdout"), "hello\n[stdout truncated 6 bytes]\n");
    }

    #[test]
    fn short_output_has_no_note() {
        let captured = Captured::drain(&b"ok\n"[..], 100).expect("drain");
        assert_eq!(captured.dropped, 0);
        assert_eq!(captured.into_text("stderr"), "ok\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let captured = Captured::drain(&[b'a', 0xff, b'b'][..], 100).expect("drain");
        assert_eq!(captured.into_text("stdout"), "a\u{fffd}b");
    }

    #[cfg(unix)]
    #[test]
    fn captures_both_streams_and_exit_code() {
        let outcome = run_tool(&request(
            &["sh", "-c", "echo out; echo err >&2; exit 4"],
            Duration::from_secs(10),
            1024,
        ))
        .expect("run");
        assert_eq!(outcome.exit_code, Some(4));
        assert_eq!(outcome.stdout, "out\n");
        assert_eq!(outcome.stderr, "err\n");
        assert!(!outcome.timed_out);
    }

    #[cfg(unix)]
    #[test]
    fn kills_on_timeout() {
        let outcome = run_tool(&request(
            &["sh", "-c", "exec sleep 5"],
            Duration::from_millis(100),
            1024,
        ))
        .expect("run");
        assert!(outcome.timed_out);
        assert!(!outcome.success());
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = run_tool(&request(
            &["pkgscaffold-no-such-program"],
            Duration::from_secs(1),
            1024,
        ))
        .expect_err("spawn");
        assert!(format!("{err:#}").contains("spawn pkgscaffold-no-such-program"));
    }

    #[test]
    fn empty_argv_is_rejected() {
        let err = run_tool(&request(&[], Duration::from_secs(1), 1024)).expect_err("empty");
        assert!(err.to_string().contains("non-empty"));
    }
}
