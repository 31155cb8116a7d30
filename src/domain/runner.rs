use crate::domain::models::ExecEvent;
use crate::error::Result;
use futures::stream::BoxStream;

/// Lazy, finite, non-restartable sequence of events for one execution.
/// Always terminated by a single `ExecEvent::Finished`.
pub type ExecutionStream = BoxStream<'static, ExecEvent>;

#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    // Starts `command` under the configured shell. Rejects with `Busy` while
    // a previous execution is still outstanding.
    fn start(&self, command: &str) -> Result<ExecutionStream>;

    // Program used to interpret commands, for error reporting
    fn shell_program(&self) -> String;
}
