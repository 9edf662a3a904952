//! Use cases (application services)

pub mod chat;
pub mod history_store;
pub mod preferences;
