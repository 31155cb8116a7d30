use crate::domain::models::CommandDefinition;
use crate::theme::PaletteType;

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Execute { name: String, command_line: String },
    Store(StoreCommand),
    LoadTemplates,
    SaveSettings(PaletteType),
}

/// Mutations of the command list. Applied by the runtime, which owns the store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    Add(CommandDefinition),
    Update(usize, CommandDefinition),
    Remove(usize),
    Move { index: usize, up: bool },
    Reload,
}
