pub mod command_panel;
pub mod footer;
pub mod header;
pub mod modals;
pub mod output_view;
