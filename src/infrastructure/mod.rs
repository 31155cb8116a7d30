pub mod executor;
pub mod store;
pub mod templates;
