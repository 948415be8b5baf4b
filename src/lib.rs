//! Shared profile configuration for the nexuscli workspace.
//!
//! The `nexuscli` binary and any other front end that talks to the
//! repository through `nexuscli-client` read connection defaults from a
//! TOML profile. This crate owns that file format and where it lives.

pub mod config;
pub mod dirs;

pub use config::{ConfigError, ProfileConfig, load_profile};
