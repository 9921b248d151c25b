//! The expansion engine.
//!
//! Each `expand` call runs three passes over the text: collapse braces,
//! expand wildcard tokens, collapse braces again (wildcard option text may
//! itself contain braces), then a separator cleanup. Every decision point
//! consumes a per-instance counter, so two independently constructed
//! expanders with the same config, fed the same text, make the same choices
//! in the same order. The mirror derivation replays expansions through
//! exactly that property.
//!
//! The engine has no failure path: missing wildcard files drop their token,
//! malformed braces stay literal, and pathological nesting is cut off by the
//! bounded round limits.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::ExpanderConfig;
use crate::grammar;
use crate::select::stable_index;
use crate::wildcards::WildcardStore;

/// Maximum brace-collapse rounds per pass. One round rewrites one block.
pub const MAX_BRACE_ROUNDS: usize = 64;

/// Maximum wildcard-expansion rounds per pass. One round rewrites one token.
pub const MAX_WILDCARD_ROUNDS: usize = 128;

const DUP_SEPARATOR_PATTERN: &str = r"\s*,\s*,\s*";
const WHITESPACE_RUN_PATTERN: &str = r"\s+";

static DUP_SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

fn dup_separator_regex() -> &'static Regex {
    DUP_SEPARATOR_REGEX
        .get_or_init(|| Regex::new(DUP_SEPARATOR_PATTERN).expect("invalid regex pattern"))
}

fn whitespace_run_regex() -> &'static Regex {
    WHITESPACE_RUN_REGEX
        .get_or_init(|| Regex::new(WHITESPACE_RUN_PATTERN).expect("invalid regex pattern"))
}

/// Which prompt an expansion is producing.
///
/// Positive substitutes each chosen option; negative substitutes the
/// comma-joined complement (all non-chosen, non-empty options).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Substitute the chosen option for each wildcard token.
    Positive,
    /// Substitute everything except the chosen option for each wildcard token.
    Negative,
}

/// A deterministic template expander.
///
/// Holds the two mutable decision counters, so an instance is not safe to
/// share across concurrent callers; give each top-level expansion request its
/// own instance. Counters reset at the start of every [`expand`] and
/// [`collapse_choices`] call.
///
/// [`expand`]: Self::expand
/// [`collapse_choices`]: Self::collapse_choices
#[derive(Debug)]
pub struct PromptExpander {
    config: ExpanderConfig,
    store: WildcardStore,
    brace_counter: u64,
    wildcard_counter: u64,
}

impl PromptExpander {
    /// Creates an expander with both counters at zero.
    pub fn new(config: ExpanderConfig) -> Self {
        let store = WildcardStore::new(config.wildcard_root.clone());
        Self {
            config,
            store,
            brace_counter: 0,
            wildcard_counter: 0,
        }
    }

    /// Returns the configuration this instance was built from.
    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Resolves a wildcard token through this expander's store.
    ///
    /// Exposed so a mirror-derivation caller outside the engine can replicate
    /// the traversal; does not consume a decision counter.
    pub fn resolve_options(&self, token: &str) -> Vec<String> {
        self.store.resolve_options(token)
    }

    /// Expands a template into concrete text.
    ///
    /// Empty input returns empty output directly, bypassing all passes.
    pub fn expand(&mut self, text: &str, phase: Phase) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.reset_counters();
        let out = self.collapse_pass(text);
        let out = self.wildcard_pass(&out, phase);
        let out = self.collapse_pass(&out);
        cleanup_separators(&out)
    }

    /// Collapses brace alternation only, with no wildcard resolution.
    pub fn collapse_choices(&mut self, text: &str) -> String {
        self.reset_counters();
        self.collapse_pass(text)
    }

    fn reset_counters(&mut self) {
        self.brace_counter = 0;
        self.wildcard_counter = 0;
    }

    /// One brace-collapsing pass: repeatedly rewrite the leftmost innermost
    /// block with a chosen alternate, up to the round limit.
    pub(crate) fn collapse_pass(&mut self, text: &str) -> String {
        let mut out = text.to_string();
        for _ in 0..MAX_BRACE_ROUNDS {
            let (start, end, chosen) = {
                match grammar::find_innermost_brace(&out) {
                    None => break,
                    Some((start, end, inner)) => {
                        let mut options = grammar::split_top_level_alternates(inner);
                        let index = self.next_brace_choice(options.len());
                        (start, end, std::mem::take(&mut options[index]))
                    }
                }
            };
            out.replace_range(start..end, &chosen);
        }
        out
    }

    /// One wildcard pass: repeatedly rewrite the leftmost token, up to the
    /// round limit. Tokens introduced by a substitution are picked up by
    /// later rounds.
    fn wildcard_pass(&mut self, text: &str, phase: Phase) -> String {
        let mut out = text.to_string();
        for _ in 0..MAX_WILDCARD_ROUNDS {
            let (start, end, replacement) = {
                match grammar::find_wildcard_token(&out) {
                    None => break,
                    Some((start, end, token)) => {
                        let options = self.store.resolve_options(token);
                        if options.is_empty() {
                            // Unknown token: drop it without consuming a
                            // decision counter.
                            (start, end, String::new())
                        } else {
                            let index = self.next_wildcard_choice(token, options.len());
                            let replacement = match phase {
                                Phase::Positive => options[index].clone(),
                                Phase::Negative => join_complement(&options, index),
                            };
                            (start, end, replacement)
                        }
                    }
                }
            };
            out.replace_range(start..end, &replacement);
        }
        out
    }

    /// Consumes one brace decision point.
    pub(crate) fn next_brace_choice(&mut self, option_count: usize) -> usize {
        let salt = format!("choice#{}", self.brace_counter);
        self.brace_counter += 1;
        stable_index(self.config.seed, self.config.variety, &salt, option_count)
    }

    /// Consumes one wildcard decision point.
    pub(crate) fn next_wildcard_choice(&mut self, token: &str, option_count: usize) -> usize {
        let salt = format!("wild#{}:{}", self.wildcard_counter, token);
        self.wildcard_counter += 1;
        stable_index(self.config.seed, self.config.variety, &salt, option_count)
    }
}

/// Comma-joins every option except the chosen one, skipping options with no
/// content so they contribute no stray separators.
fn join_complement(options: &[String], chosen: usize) -> String {
    let rest: Vec<&str> = options
        .iter()
        .enumerate()
        .filter(|(index, option)| *index != chosen && !option.trim().is_empty())
        .map(|(_, option)| option.as_str())
        .collect();
    rest.join(", ")
}

/// Final cleanup: collapse duplicate separators to a single `", "`, collapse
/// whitespace runs, and strip leading/trailing separator characters.
///
/// Idempotent: running it on its own output changes nothing.
pub fn cleanup_separators(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let next = dup_separator_regex().replace_all(&out, ", ").into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    let out = whitespace_run_regex().replace_all(&out, " ");
    out.trim_matches(|c: char| c == ',' || c == ' ').to_string()
}
