//! CLI library components for the annotation validator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
