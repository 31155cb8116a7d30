use super::keymap::KeyMap;
use crate::domain::models::CommandDefinition;
use crate::theme::{PaletteType, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod error;
pub mod form;
pub mod input;
pub mod output;
pub mod panel;
pub mod prompt;
pub mod templates;
pub mod theme;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use form::{CommandFormState, FormField};
pub use input::{AppTextArea, InputState};
pub use output::{OutputEntry, OutputKind, OutputState};
pub use panel::PanelState;
pub use prompt::PromptState;
pub use templates::TemplatePickerState;
pub use theme::ThemeSelectionState;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Navigating the panel
    FilterInput,    // Typing a search keyword
    Prompt,         // Collecting placeholder values for a run
    CommandForm,    // Adding or editing a command
    TemplatePicker, // Browsing the template library
    ThemeSelection, // Choosing a UI theme
    Help,           // Showing the help overlay
    ConfirmDelete,  // Waiting for y/n on a delete
}

/// The command currently executing.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningCommand {
    pub name: String,
    pub started: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,

    // --- Commands (snapshot of the store) ---
    pub commands: Vec<CommandDefinition>,
    pub panel: PanelState,

    // --- Execution ---
    pub running: Option<RunningCommand>,
    pub output: OutputState,
    pub shell_program: String,
    pub working_dir: PathBuf,

    // --- Modals ---
    pub input: Option<InputState<'a>>,
    pub prompt: Option<PromptState>,
    pub form: Option<CommandFormState<'a>>,
    pub templates: Option<TemplatePickerState>,
    pub theme_selection: Option<ThemeSelectionState>,
    pub pending_delete: Option<usize>,

    // --- Animation ---
    pub frame_count: u64,
    pub spinner: String,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: PaletteType,
    pub theme: Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(commands: Vec<CommandDefinition>, palette_type: PaletteType) -> Self {
        let mut state = Self {
            commands,
            palette_type,
            theme: Theme::from_palette_type(palette_type),
            working_dir: std::env::current_dir().unwrap_or_default(),
            ..Default::default()
        };
        state.panel.refresh(&state.commands);
        state
    }

    pub fn selected_definition(&self) -> Option<&CommandDefinition> {
        self.panel
            .selected_command()
            .and_then(|i| self.commands.get(i))
    }

    pub fn set_commands(&mut self, commands: Vec<CommandDefinition>) {
        self.commands = commands;
        self.panel.refresh(&self.commands);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_TIMEOUT);
    }

    pub fn set_error(&mut self, error: ErrorState) {
        match error.severity {
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                tracing::error!(message = %error.message, "error reported to the panel");
            }
            _ => tracing::warn!(message = %error.message, "warning reported to the panel"),
        }
        self.last_error = Some(error);
    }

    /// Advance animations and expire the status message.
    pub fn tick(&mut self, now: Instant) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.running.is_some() {
            let frame = (self.frame_count % SPINNER_FRAMES.len() as u64) as usize;
            self.spinner = SPINNER_FRAMES[frame].to_string();
        }
        if self.status_clear_time.is_some_and(|t| now >= t) {
            self.status_message = None;
            self.status_clear_time = None;
        }
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            commands: Vec::new(),
            panel: PanelState::default(),
            running: None,
            output: OutputState::default(),
            shell_program: String::new(),
            working_dir: PathBuf::from("."),
            input: None,
            prompt: None,
            form: None,
            templates: None,
            theme_selection: None,
            pending_delete: None,
            frame_count: 0,
            spinner: SPINNER_FRAMES[0].to_string(),
            keymap: Arc::new(KeyMap::default()),
            palette_type: PaletteType::default(),
            theme: Theme::default(),
        }
    }
}
