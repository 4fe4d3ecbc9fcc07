//! # Calcvault Architecture
//!
//! Calcvault is a small personal vault of math notes behind a login. A user
//! authenticates against a reference credential, writes short notes whose body
//! is usually an arithmetic expression, and evaluates them on demand.
//!
//! Like any UI-agnostic core, it is a library first; the `calcvault` binary is
//! one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Login gate in front of the session                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Session (session.rs)       │
//! │  - create / list / evaluate on a ready session              │
//! │  - load on start, save on stop (and on drop)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - CredentialStore and BlobStore traits                     │
//! │  - File-backed (production), in-memory (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The expression evaluator (`eval/`) sits beside these layers. It is pure and
//! stateless, and accepts only a fixed arithmetic grammar.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward the code never writes to stdout/stderr and never
//! exits the process. Anything meant for the user goes through a
//! [`report::Reporter`]; diagnostics go through the `log` facade.
//!
//! ## Threading
//!
//! Everything runs on one thread. The session exclusively owns the note
//! collection, and stores use `Cell`/`RefCell` rather than locks.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`auth`]: Authentication gate
//! - [`collection`]: Ordered note collection and its blob format
//! - [`commands`]: create, list and evaluate
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - [`eval`]: Safe expression evaluator
//! - [`init`]: Data directory resolution and production wiring
//! - [`model`]: Core data types (`Credential`, `Note`, `NoteId`)
//! - [`report`]: User notification and error logging capability
//! - [`session`]: Load/save lifecycle
//! - [`store`]: Storage adapters
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod auth;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod eval;
pub mod init;
pub mod model;
pub mod report;
pub mod session;
pub mod store;
