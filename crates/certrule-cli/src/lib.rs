//! CLI library components for certificate rule selection.

pub mod commands;
pub mod logging;
pub mod settings;
pub mod summary;
