//! List command implementation
//!
//! Scans the wildcard root for `.txt` files and reports the token each one
//! backs, how many options it parses into, and whether it is mirror-flagged.

use anyhow::{bail, Result};
use colored::Colorize;
use promptspin_core::{WildcardStore, MIRROR_SUFFIX};
use serde::Serialize;
use std::process::ExitCode;
use walkdir::WalkDir;

use super::wildcard_root;

/// One wildcard token entry in the listing.
#[derive(Serialize)]
struct TokenEntry {
    token: String,
    options: usize,
    mirror: bool,
}

/// Run the list command.
pub fn run(wildcards: Option<&str>, json: bool) -> Result<ExitCode> {
    let root = wildcard_root(wildcards);
    if !root.is_dir() {
        bail!("wildcard directory not found: {}", root.display());
    }
    let store = WildcardStore::new(&root);

    let mut entries = Vec::new();
    for entry in WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(&root) else {
            continue;
        };
        let token = relative
            .with_extension("")
            .to_string_lossy()
            .replace('\\', "/");
        let options = store.resolve_options(&token).len();
        let mirror = token.ends_with(MIRROR_SUFFIX);
        entries.push(TokenEntry {
            token,
            options,
            mirror,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!(
            "{} {} ({} token(s))",
            "Wildcards:".cyan().bold(),
            root.display(),
            entries.len()
        );
        for entry in &entries {
            let marker = if entry.mirror { " (mirror)" } else { "" };
            println!(
                "  __{}__{} - {} option(s)",
                entry.token,
                marker.dimmed(),
                entry.options
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
