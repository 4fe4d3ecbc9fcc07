//! # CLI Layer
//!
//! This module is one possible UI client for calcvault, not the vault itself.
//!
//! It is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads credentials from the environment
//! - Initializes the logger
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `setup`: clap definitions and version string
//! - `commands`: `run()` dispatch and per-command handlers
//! - `print`: output formatting and the console reporter

mod commands;
mod print;
mod setup;

pub use commands::run;
