//! Promptspin CLI library.
//!
//! Command implementations live here so they stay testable; `main.rs` only
//! parses arguments and dispatches.

pub mod commands;
