//! Command-line front end for `nexuscli-client`.
//!
//! The `nexuscli` binary is a thin wrapper around this library so that the
//! argument handling and subcommands can be tested without spawning a
//! process.
//!
//! # Modules
//!
//! - [`batch`] - Artifact list parsing and sequential batch downloads
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Subcommand execution
//! - [`error`] - CLI error type and exit codes
//! - [`output`] - Logging setup and stdout helpers
//! - [`settings`] - Flag, environment and profile merging

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod settings;
