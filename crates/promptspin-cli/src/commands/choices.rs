//! Choices command implementation
//!
//! Brace-only collapse: resolves `{a|b|...}` alternation deterministically
//! and leaves wildcard tokens untouched. No wildcard directory is needed, so
//! the expander gets an empty root it will never read.

use anyhow::Result;
use promptspin_core::{ExpanderConfig, PromptExpander};
use std::process::ExitCode;

/// Run the choices command.
pub fn run(text: &str, seed: u32, variety: u32) -> Result<ExitCode> {
    let config = ExpanderConfig::new(seed, "").with_variety(variety);
    let mut expander = PromptExpander::new(config);
    println!("{}", expander.collapse_choices(text));
    Ok(ExitCode::SUCCESS)
}
