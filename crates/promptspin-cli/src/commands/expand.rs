//! Expand command implementation
//!
//! Expands a positive template, expands the user-supplied negative in
//! negative phase, derives mirrored exclusions from the positive template,
//! and merges the two negatives. Each of the three derivations uses its own
//! expander instance so their decision counters cannot cross-talk.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use promptspin_core::{
    derive_exclusions_text, merge_text_lists, ExpanderConfig, Phase, PromptExpander,
};
use serde::Serialize;
use std::fs;
use std::process::ExitCode;

use super::wildcard_root;

/// Machine-readable output for `--json`.
#[derive(Serialize)]
struct ExpandOutput {
    text: String,
    negative: String,
    seed: u32,
    variety: u32,
}

/// Run the expand command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    text: Option<&str>,
    file: Option<&str>,
    negative: Option<&str>,
    seed: u32,
    wildcards: Option<&str>,
    variety: u32,
    no_auto_negative: bool,
    json: bool,
) -> Result<ExitCode> {
    let template = match (text, file) {
        (Some(text), None) => text.to_string(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {}", path))?,
        (Some(_), Some(_)) => bail!("pass either template text or --file, not both"),
        (None, None) => bail!("no template given (pass text or --file)"),
    };

    let config = ExpanderConfig::new(seed, wildcard_root(wildcards)).with_variety(variety);

    let positive = PromptExpander::new(config.clone()).expand(&template, Phase::Positive);

    let user_negative = PromptExpander::new(config.clone())
        .expand(negative.unwrap_or_default(), Phase::Negative);
    let exclusions = if no_auto_negative {
        String::new()
    } else {
        derive_exclusions_text(&template, &config)
    };
    let merged_negative = merge_text_lists([user_negative.as_str(), exclusions.as_str()]);

    if json {
        let output = ExpandOutput {
            text: positive,
            negative: merged_negative,
            seed,
            variety,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Positive:".cyan().bold(), positive);
        println!("{} {}", "Negative:".cyan().bold(), merged_negative);
        println!(
            "{} seed={} variety={}",
            "Lane:".dimmed(),
            seed,
            variety
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_with_corpus() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hair.txt"), "short\nlong\n").unwrap();
        fs::write(dir.path().join("mood-mir.txt"), "calm\nwild\n").unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let result = run(
            Some("__hair__ hair, __mood-mir__"),
            None,
            Some("blurry"),
            42,
            Some(&root),
            0,
            false,
            true,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_rejects_missing_template() {
        let result = run(None, None, None, 0, None, 0, false, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_rejects_both_sources() {
        let result = run(Some("x"), Some("y.txt"), None, 0, None, 0, false, false);
        assert!(result.is_err());
    }
}
