//! Request progress display

pub mod reporter;
