//! Mirror derivation: collecting the options an expansion did *not* choose.
//!
//! Mirroring is driven purely by naming convention: tokens whose name ends in
//! the `-mir` suffix contribute their non-chosen options to the mirror bag.
//! Which option was chosen is only knowable by re-deciding the exact choice
//! sequence the positive expansion made, so the derivation constructs a
//! brand-new expander with the same config (counters starting at the same
//! zero baseline) and walks the template from scratch. No state is shared
//! with the original instance; matching seed, variety, and decision order are
//! what make the replay exact.

use crate::config::ExpanderConfig;
use crate::expander::{PromptExpander, MAX_WILDCARD_ROUNDS};
use crate::grammar;

/// Replays a template's decision sequence and collects the mirror bag.
///
/// For every mirror-suffixed token encountered, every option at a different
/// index whose trimmed content is non-empty and whose value differs from the
/// chosen one is appended, once per occurrence. Tokens resolving to zero
/// options are deleted without collection and without consuming a decision
/// counter, matching the engine's own traversal.
pub fn derive_exclusions(template: &str, config: &ExpanderConfig) -> Vec<String> {
    if template.is_empty() {
        return Vec::new();
    }

    let mut twin = PromptExpander::new(config.clone());
    let mut working = twin.collapse_pass(template);
    let mut bag = Vec::new();

    for _ in 0..MAX_WILDCARD_ROUNDS {
        let (start, end, chosen, additions) = {
            match grammar::find_wildcard_token(&working) {
                None => break,
                Some((start, end, token)) => {
                    let options = twin.resolve_options(token);
                    if options.is_empty() {
                        (start, end, String::new(), Vec::new())
                    } else {
                        let index = twin.next_wildcard_choice(token, options.len());
                        let additions = if grammar::is_mirror_token(token) {
                            complement_of(&options, index)
                        } else {
                            Vec::new()
                        };
                        (start, end, options[index].clone(), additions)
                    }
                }
            }
        };
        bag.extend(additions);
        // Substitute the chosen option so nested tokens introduced by the
        // substitution are themselves discovered and processed.
        working.replace_range(start..end, &chosen);
    }

    bag
}

/// Renders the mirror bag for a template as a comma-joined string.
///
/// Deduplication against a user-supplied negative is the caller's job; see
/// [`merge_text_lists`].
pub fn derive_exclusions_text(template: &str, config: &ExpanderConfig) -> String {
    derive_exclusions(template, config).join(", ")
}

/// Options that were available but not chosen, each at most once.
fn complement_of(options: &[String], chosen: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for (index, option) in options.iter().enumerate() {
        if index == chosen || *option == options[chosen] {
            continue;
        }
        if option.trim().is_empty() {
            continue;
        }
        if out.contains(option) {
            continue;
        }
        out.push(option.clone());
    }
    out
}

/// Merges comma-separated text lists, preserving first-seen order and
/// removing case-insensitive duplicates.
pub fn merge_text_lists<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut merged: Vec<&str> = Vec::new();
    for part in parts {
        for item in part.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            if seen.insert(item.to_lowercase()) {
                merged.push(item);
            }
        }
    }
    merged.join(", ")
}
