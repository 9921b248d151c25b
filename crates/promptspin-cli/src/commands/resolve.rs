//! Resolve command implementation
//!
//! Resolves one wildcard token through the checked resolver, so a token the
//! engine would silently drop gets an explanation and a failure exit code.

use anyhow::Result;
use colored::Colorize;
use promptspin_core::{ResolveError, WildcardStore, MIRROR_SUFFIX};
use serde::Serialize;
use std::process::ExitCode;

use super::wildcard_root;

/// Machine-readable output for `--json`.
#[derive(Serialize)]
struct ResolveOutput {
    token: String,
    mirror: bool,
    options: Vec<String>,
    error: Option<String>,
}

/// Run the resolve command.
pub fn run(token: &str, wildcards: Option<&str>, json: bool) -> Result<ExitCode> {
    let store = WildcardStore::new(wildcard_root(wildcards));
    let mirror = token.ends_with(MIRROR_SUFFIX);

    match store.resolve_options_checked(token) {
        Ok(options) => {
            if json {
                let output = ResolveOutput {
                    token: token.to_string(),
                    mirror,
                    options,
                    error: None,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let marker = if mirror { " (mirror)" } else { "" };
                println!(
                    "{} {}{} - {} option(s)",
                    "Token:".cyan().bold(),
                    token,
                    marker.dimmed(),
                    options.len()
                );
                for (index, option) in options.iter().enumerate() {
                    println!("  {:>3}  {}", index, option);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if json {
                let output = ResolveOutput {
                    token: token.to_string(),
                    mirror,
                    options: Vec::new(),
                    error: Some(err.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                match err {
                    ResolveError::NotFound { .. } => {
                        println!("{} {}", "!".yellow(), err);
                        println!("  the engine drops this token silently during expansion");
                    }
                    ResolveError::UnsafeToken { .. } | ResolveError::Io { .. } => {
                        println!("{} {}", "x".red(), err);
                    }
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
