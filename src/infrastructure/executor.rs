//! Runs resolved command lines under a shell and streams their output.
//!
//! stdout and stderr are read concurrently, one task per pipe, and every
//! completed line is forwarded as soon as it is read. A supervisor task waits
//! for both readers to hit EOF before reaping the child, so the single
//! `Finished` event is always the last one on the stream.

use crate::config::ShellConfig;
use crate::domain::models::{Completion, ExecEvent, OutputLine, OutputStream, TERMINATED_CODE};
use crate::domain::runner::{CommandRunner, ExecutionStream};
use crate::error::{PanelError, Result};
use futures::StreamExt;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

const EVENT_BUFFER: usize = 256;

/// Clears the busy flag when dropped.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ShellExecutor {
    shell: ShellConfig,
    busy: Arc<AtomicBool>,
}

impl ShellExecutor {
    #[must_use]
    pub fn new(shell: ShellConfig) -> Self {
        Self {
            shell,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start `command`. Must be called from within a tokio runtime.
    ///
    /// Spawn failures are not an `Err`: they come back as a stream holding a
    /// single `Finished` event with `SPAWN_FAILURE_CODE`. The only error is
    /// `Busy`, when a previous stream has not finished yet.
    pub fn run(&self, command: &str) -> Result<ExecutionStream> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(command, "rejected: another command is still running");
            return Err(PanelError::Busy);
        }
        let guard = BusyGuard(self.busy.clone());

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        tracing::info!(shell = %self.shell.program, command, "starting command");
        let spawned = Command::new(&self.shell.program)
            .args(&self.shell.args)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(shell = %self.shell.program, "failed to spawn: {e}");
                drop(guard);
                // Fresh channel with spare capacity, so this cannot fail.
                let _ = tx.try_send(ExecEvent::Finished(Completion::spawn_failed(e.to_string())));
                return Ok(into_stream(rx));
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        tokio::spawn(async move {
            let stdout_task = stdout.map(|out| tokio::spawn(pump(out, OutputStream::Stdout, tx.clone())));
            let stderr_task = stderr.map(|err| tokio::spawn(pump(err, OutputStream::Stderr, tx.clone())));

            for task in [stdout_task, stderr_task].into_iter().flatten() {
                if let Err(e) = task.await {
                    tracing::error!("output reader panicked: {e}");
                }
            }

            let completion = match child.wait().await {
                Ok(status) => Completion::exited(status.code().unwrap_or(TERMINATED_CODE)),
                Err(e) => {
                    tracing::error!("failed to wait for child: {e}");
                    Completion::exited(TERMINATED_CODE)
                }
            };
            tracing::info!(exit_code = completion.exit_code, "command finished");

            // Free the executor before announcing completion so the listener
            // can start the next command straight away.
            drop(guard);
            let _ = tx.send(ExecEvent::Finished(completion)).await;
        });

        Ok(into_stream(rx))
    }
}

impl CommandRunner for ShellExecutor {
    fn start(&self, command: &str) -> Result<ExecutionStream> {
        self.run(command)
    }

    fn shell_program(&self) -> String {
        self.shell.program.clone()
    }
}

fn into_stream(rx: mpsc::Receiver<ExecEvent>) -> ExecutionStream {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
    .boxed()
}

async fn pump<R>(reader: R, stream: OutputStream, tx: mpsc::Sender<ExecEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut forwarding = true;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if !forwarding {
                    // Listener is gone; keep draining so the child never blocks on a full pipe.
                    continue;
                }
                let line = OutputLine {
                    stream,
                    text: decode_line(&buf),
                };
                if tx.send(ExecEvent::Output(line)).await.is_err() {
                    tracing::debug!(?stream, "listener dropped, discarding remaining output");
                    forwarding = false;
                }
            }
            Err(e) => {
                tracing::warn!(?stream, "read error: {e}");
                break;
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && raw[end - 1] == b'\r' {
        end -= 1;
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Callback-shaped wrapper over the event stream: `on_line` once per output
/// line in order, then `on_complete` exactly once.
pub async fn run_with_callbacks<L, C>(
    runner: &dyn CommandRunner,
    command: &str,
    mut on_line: L,
    on_complete: C,
) -> Result<()>
where
    L: FnMut(OutputLine),
    C: FnOnce(Completion),
{
    let mut stream = runner.start(command)?;
    let mut on_complete = Some(on_complete);
    while let Some(event) = stream.next().await {
        match event {
            ExecEvent::Output(line) => on_line(line),
            ExecEvent::Finished(completion) => {
                if let Some(callback) = on_complete.take() {
                    callback(completion);
                }
                break;
            }
        }
    }
    Ok(())
}
