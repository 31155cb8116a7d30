use crate::app::command::Command;
use crate::domain::models::{CommandDefinition, Completion, OutputLine};
use crate::infrastructure::templates::TemplateCategory;
use crate::theme::PaletteType;

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Navigation ---
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    SelectIndex(usize),
    ScrollOutputUp(u16),
    ScrollOutputDown(u16),
    ScrollOutputBottom,

    // --- Panel ---
    RunSelected,  // Start the selected command (prompts first if needed)
    SubmitInput,  // Enter in a prompt, filter or form
    ClearOutput,  // Empty the output pane
    ReloadCommands, // Re-read commands.json

    // --- Command Management ---
    AddCommandIntent,      // Open an empty command form
    EditCommandIntent,     // Open the form on the selected command
    DeleteCommandIntent,   // Ask for delete confirmation
    ConfirmDelete,         // Delete the pending command
    MoveCommandUp,         // Swap with the previous command
    MoveCommandDown,       // Swap with the next command
    FormNextField,         // Tab in the command form
    FormPrevField,         // Shift+Tab in the command form
    FormCycleKind(bool),   // Left/Right on the type field
    OpenTemplates,         // Open the template library
    TemplateNext,
    TemplatePrev,
    TemplateNextCategory,
    TemplatePrevCategory,
    TemplateSelect,        // Append the highlighted template

    // --- UI Mode Transitions ---
    EnterFilterMode,                           // Open filter bar (/)
    ClearFilter,                               // Show every command again
    CancelMode,                                // ESC key (close modal/mode)
    ToggleHelp,                                // Toggle the help overlay (?)
    EnterThemeSelection,                       // Open theme selection modal (T)
    SelectThemeNext,                           // Next theme in selection
    SelectThemePrev,                           // Previous theme in selection
    SwitchTheme(PaletteType),                  // Apply a new theme
    TextAreaInput(crossterm::event::KeyEvent), // Handle text area input

    // --- Async Results ---
    CommandsLoaded(Vec<CommandDefinition>, Option<usize>), // Fresh snapshot, command to focus
    TemplatesLoaded(Vec<TemplateCategory>),
    OutputReceived(OutputLine),
    ExecutionFinished(Completion),
    ExecutionRejected(String),                  // The runner refused to start
    OperationCompleted(Result<String, String>), // Success/Failure message
    ErrorOccurred(String),                      // General error reporting
    WarningOccurred(String),                    // Recoverable problem worth a notice
    ExternalChangeDetected,                     // commands.json changed on disk
}
