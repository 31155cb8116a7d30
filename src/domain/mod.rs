pub mod models;
pub mod placeholder;
pub mod runner;
