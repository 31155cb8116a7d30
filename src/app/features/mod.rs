pub mod manager;
pub mod navigation;
pub mod panel;
pub mod ui;
