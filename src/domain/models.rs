use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a command; decides which placeholders resolve without a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    #[default]
    Normal,
    Upload,
    Download,
    Screenshot,
}

impl CommandKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            CommandKind::Normal => "normal",
            CommandKind::Upload => "upload",
            CommandKind::Download => "download",
            CommandKind::Screenshot => "screenshot",
        }
    }

    #[must_use]
    pub fn all() -> &'static [CommandKind] {
        &[
            CommandKind::Normal,
            CommandKind::Upload,
            CommandKind::Download,
            CommandKind::Screenshot,
        ]
    }

    /// Next kind in `all()` order, wrapping. Used by the command form.
    #[must_use]
    pub fn cycle(self, forward: bool) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|k| *k == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        all[next]
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(rename = "command")]
    pub template: String,
    #[serde(rename = "type", default)]
    pub kind: CommandKind,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandDefinition {
    /// New definition whose icon follows its kind.
    pub fn new(name: impl Into<String>, template: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            kind,
            icon: kind.label().to_string(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Icon name to render; falls back to the kind when none was stored.
    #[must_use]
    pub fn icon_name(&self) -> &str {
        if self.icon.trim().is_empty() {
            self.kind.label()
        } else {
            &self.icon
        }
    }

    /// Case-insensitive substring match on name or template.
    /// `keyword` is expected to be lowercased already.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        keyword.is_empty()
            || self.name.to_lowercase().contains(keyword)
            || self.template.to_lowercase().contains(keyword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// One completed line of process output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: OutputStream,
    pub text: String,
}

impl OutputLine {
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stdout,
            text: text.into(),
        }
    }

    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            stream: OutputStream::Stderr,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn is_stderr(&self) -> bool {
        self.stream == OutputStream::Stderr
    }
}

/// Exit code reported when the shell could not be started.
pub const SPAWN_FAILURE_CODE: i32 = -1;
/// Exit code reported when the process ended without one (killed by a signal).
pub const TERMINATED_CODE: i32 = -2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub exit_code: i32,
    pub spawn_error: Option<String>,
}

impl Completion {
    #[must_use]
    pub fn exited(exit_code: i32) -> Self {
        Self {
            exit_code,
            spawn_error: None,
        }
    }

    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self {
            exit_code: SPAWN_FAILURE_CODE,
            spawn_error: Some(reason.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.spawn_error.is_none() && self.exit_code == 0
    }

    #[must_use]
    pub fn is_spawn_failure(&self) -> bool {
        self.spawn_error.is_some()
    }

    /// Map the outcome onto the error taxonomy. `program` names the shell
    /// in the spawn error.
    pub fn check(&self, program: &str) -> crate::error::Result<()> {
        if let Some(reason) = &self.spawn_error {
            return Err(crate::error::PanelError::spawn(program, reason));
        }
        if self.exit_code != 0 {
            return Err(crate::error::PanelError::NonZeroExit(self.exit_code));
        }
        Ok(())
    }
}

/// Event produced by a running command. A stream of these ends with exactly one `Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    Output(OutputLine),
    Finished(Completion),
}
