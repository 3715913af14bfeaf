//! `issuebook` - Single-user issue tracker
//!
//! This crate hosts the `ib` CLI around the store in `issuebook-lib`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration (defaults, YAML file, env, flags)
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - `tracing` subscriber setup
//! - [`validation`] - Required-field checks applied before calling the store
//!
//! Entities, persistence and the store itself live in [`issuebook_lib`].

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod validation;

pub use issuebook_lib::{IssuebookError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration, logging setup or command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
