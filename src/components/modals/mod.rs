mod command_form;
mod confirm_delete;
mod error;
mod help;
mod helpers;
mod manager;
mod template_picker;
mod text_input;
mod theme_selection;

pub use manager::ModalManager;
