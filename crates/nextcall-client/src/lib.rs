//! CLI, event source, launcher output, join action
//!
//! This crate provides the `nextcall` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod source;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
