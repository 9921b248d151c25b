//! Promptspin Core Library
//!
//! This crate deterministically expands a small templating grammar (nested
//! bracketed alternatives and file-backed wildcard tokens) into concrete
//! text, driven by an integer seed: the same seed, template, and wildcard
//! corpus always reproduce the same output. A companion derivation replays
//! the same decision sequence to collect a "mirrored" exclusion set for
//! `-mir`-suffixed tokens, used to build negative/contrastive text.
//!
//! # Overview
//!
//! The template grammar has two constructs:
//!
//! - **Brace alternation**: `{a|b|{c|d}|}` — a single choice among literal
//!   alternates, which may nest and may be empty
//! - **Wildcard tokens**: `__name__` — resolved against `name.txt` under the
//!   wildcard root; subfolder and dotted names are allowed
//!
//! Expansion is a best-effort creative-text transform, never a strict parse:
//! missing files drop their token, malformed braces stay literal, and cyclic
//! references are cut off by bounded pass limits.
//!
//! # Example
//!
//! ```
//! use promptspin_core::{ExpanderConfig, Phase, PromptExpander};
//!
//! let config = ExpanderConfig::new(42, "wildcards");
//! let mut expander = PromptExpander::new(config);
//!
//! let out = expander.expand("a {red|blue} bird", Phase::Positive);
//! assert!(out == "a red bird" || out == "a blue bird");
//!
//! // Same seed, same template: same output, every time.
//! assert_eq!(out, expander.expand("a {red|blue} bird", Phase::Positive));
//! ```
//!
//! # Modules
//!
//! - [`config`]: Expander configuration (seed, wildcard root, variety lane)
//! - [`error`]: Resolution error types for diagnostic callers
//! - [`grammar`]: Brace and wildcard-token grammar primitives
//! - [`select`]: Deterministic counter-seeded choice selection
//! - [`wildcards`]: Wildcard file resolution and parsing
//! - [`expander`]: The three-pass expansion engine
//! - [`mirror`]: Twin-instance mirror derivation and list merging

pub mod config;
pub mod error;
pub mod expander;
pub mod grammar;
pub mod mirror;
pub mod select;
pub mod wildcards;

// Re-export commonly used types at the crate root
pub use config::ExpanderConfig;
pub use error::ResolveError;
pub use expander::{
    cleanup_separators, Phase, PromptExpander, MAX_BRACE_ROUNDS, MAX_WILDCARD_ROUNDS,
};
pub use grammar::MIRROR_SUFFIX;
pub use mirror::{derive_exclusions, derive_exclusions_text, merge_text_lists};
pub use select::stable_index;
pub use wildcards::WildcardStore;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn corpus(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    /// The full positive/negative flow a host caller runs: expand the
    /// positive template, expand the user negative, derive mirror exclusions
    /// from the positive template, and merge.
    #[test]
    fn test_full_prompt_flow() {
        let dir = corpus(&[
            ("hair.txt", "short\nlong\ncurly\n"),
            ("mood-mir.txt", "{calm|{wild|fierce}}\n"),
        ]);
        let config = ExpanderConfig::new(2024, dir.path());
        let template = "{portrait|landscape} of a person, __hair__ hair, __mood-mir__";

        let positive = PromptExpander::new(config.clone()).expand(template, Phase::Positive);
        assert!(!positive.contains("__"), "all tokens expanded: {}", positive);
        assert!(!positive.contains('{'), "all braces collapsed: {}", positive);

        let user_negative =
            PromptExpander::new(config.clone()).expand("blurry, {bad hands|bad anatomy}", Phase::Negative);
        let exclusions = derive_exclusions_text(template, &config);
        let merged = merge_text_lists([user_negative.as_str(), exclusions.as_str()]);

        // The two non-chosen moods land in the merged negative; the chosen
        // one must not.
        let moods = ["calm", "wild", "fierce"];
        let in_negative: Vec<&str> = moods
            .iter()
            .filter(|mood| merged.contains(*mood))
            .copied()
            .collect();
        assert_eq!(in_negative.len(), 2);
        for mood in moods {
            assert_eq!(
                positive.contains(mood),
                !merged.contains(mood),
                "mood {} must be in exactly one of positive/negative",
                mood
            );
        }
    }

    /// Expansion output is stable across process-independent instances and
    /// repeated calls for a spread of seeds.
    #[test]
    fn test_determinism_property() {
        let dir = corpus(&[
            ("hair.txt", "short\nlong\ncurly\n"),
            ("styles/dark.txt", "noir\ngothic\n"),
        ]);
        let template = "{a|b|{c|}} __hair__ __styles/dark.txt__ __styles/dark__";

        for seed in [0u32, 1, 42, 4096, u32::MAX] {
            let config = ExpanderConfig::new(seed, dir.path());
            let a = PromptExpander::new(config.clone()).expand(template, Phase::Positive);
            let b = PromptExpander::new(config.clone()).expand(template, Phase::Positive);
            assert_eq!(a, b, "seed {}", seed);
        }
    }

    /// Wildcard corpus scenario from the resolver rules: one file per token,
    /// strict suffix lookup, dotted subfolder names.
    #[test]
    fn test_strict_suffix_lookup_end_to_end() {
        let dir = corpus(&[("hair.txt", "short\nlong\ncurly\n")]);
        let config = ExpanderConfig::new(7, dir.path());

        // hair-mir has no file of its own, so the token disappears even
        // though hair.txt exists.
        let out = PromptExpander::new(config.clone()).expand("__hair-mir__", Phase::Positive);
        assert_eq!(out, "");
        assert!(derive_exclusions("__hair-mir__", &config).is_empty());
    }
}
