//! Grammar primitives for the template syntax.
//!
//! Two node kinds exist: brace alternation blocks (`{a|b|{c|d}|}`, empty
//! alternates allowed) and wildcard token references (`__name__`). Both are
//! discovered by leftmost-match scanning; nesting arises from substitution,
//! not from a static parse tree.

use regex::Regex;
use std::sync::OnceLock;

/// Trailing marker on a wildcard token name that flags it for strict lookup
/// and exclusion-set collection.
pub const MIRROR_SUFFIX: &str = "-mir";

/// Regex pattern for a brace block containing no nested braces.
const INNER_BRACE_PATTERN: &str = r"\{([^{}]*)\}";

/// Regex pattern for a wildcard token reference. Names may contain path
/// separators and dots so tokens can live in subfolders.
const WILDCARD_TOKEN_PATTERN: &str = r"__([A-Za-z0-9_./-]+)__";

static INNER_BRACE_REGEX: OnceLock<Regex> = OnceLock::new();
static WILDCARD_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn inner_brace_regex() -> &'static Regex {
    INNER_BRACE_REGEX.get_or_init(|| Regex::new(INNER_BRACE_PATTERN).expect("invalid regex pattern"))
}

fn wildcard_token_regex() -> &'static Regex {
    WILDCARD_TOKEN_REGEX
        .get_or_init(|| Regex::new(WILDCARD_TOKEN_PATTERN).expect("invalid regex pattern"))
}

/// Returns true when a token name is flagged as mirrorable.
pub fn is_mirror_token(name: &str) -> bool {
    name.ends_with(MIRROR_SUFFIX)
}

/// Locates the leftmost brace block containing no nested braces.
///
/// Returns the byte span of the whole block (braces included) and the inner
/// alternate list, or `None` when no such block exists (including when the
/// only brace syntax present is unbalanced).
pub fn find_innermost_brace(s: &str) -> Option<(usize, usize, &str)> {
    let captures = inner_brace_regex().captures(s)?;
    let whole = captures.get(0)?;
    let inner = captures.get(1)?;
    Some((whole.start(), whole.end(), inner.as_str()))
}

/// Locates the leftmost wildcard token reference.
///
/// Returns the byte span of the whole reference (underscores included) and
/// the bare token name.
pub fn find_wildcard_token(s: &str) -> Option<(usize, usize, &str)> {
    let captures = wildcard_token_regex().captures(s)?;
    let whole = captures.get(0)?;
    let name = captures.get(1)?;
    Some((whole.start(), whole.end(), name.as_str()))
}

/// Splits an alternate list on `|` characters that are not inside a nested
/// `{...}`, trimming each alternate but preserving empty ones.
pub fn split_top_level_alternates(inner: &str) -> Vec<String> {
    let mut alternates = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in inner.chars() {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '|' if depth == 0 => {
                alternates.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    alternates.push(current.trim().to_string());
    alternates
}

/// Recursively expands all brace nesting in `expr` into the full
/// cross-product of leaf strings.
///
/// Used only for mirror-suffixed single-line wildcard files, where "all
/// options except chosen" must be well-defined over leaves rather than
/// top-level groups. Unbalanced brace syntax at any level leaves the whole
/// expression untouched as a single literal, never an error.
pub fn flatten_brace_expression(expr: &str) -> Vec<String> {
    if !is_balanced(expr) {
        return vec![expr.to_string()];
    }
    flatten_balanced(expr)
}

fn flatten_balanced(expr: &str) -> Vec<String> {
    match find_innermost_brace(expr) {
        None => vec![expr.trim().to_string()],
        Some((start, end, inner)) => {
            let mut leaves = Vec::new();
            for alternate in split_top_level_alternates(inner) {
                let candidate = format!("{}{}{}", &expr[..start], alternate, &expr[end..]);
                leaves.extend(flatten_balanced(&candidate));
            }
            leaves
        }
    }
}

/// Checks that every `{` has a matching `}` with no close before its open.
fn is_balanced(expr: &str) -> bool {
    let mut depth = 0i64;
    for c in expr.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_innermost_brace_flat() {
        let (start, end, inner) = find_innermost_brace("a {b|c} d").unwrap();
        assert_eq!(&"a {b|c} d"[start..end], "{b|c}");
        assert_eq!(inner, "b|c");
    }

    #[test]
    fn test_find_innermost_brace_nested() {
        // The outer block contains a nested one, so the inner block wins.
        let s = "{a|{b|c}}";
        let (start, end, inner) = find_innermost_brace(s).unwrap();
        assert_eq!(&s[start..end], "{b|c}");
        assert_eq!(inner, "b|c");
    }

    #[test]
    fn test_find_innermost_brace_empty_block() {
        let (_, _, inner) = find_innermost_brace("x{}y").unwrap();
        assert_eq!(inner, "");
    }

    #[test]
    fn test_find_innermost_brace_unbalanced() {
        assert!(find_innermost_brace("{a|b").is_none());
        assert!(find_innermost_brace("a}b").is_none());
    }

    #[test]
    fn test_find_wildcard_token() {
        let s = "a __hair__ b";
        let (start, end, name) = find_wildcard_token(s).unwrap();
        assert_eq!(&s[start..end], "__hair__");
        assert_eq!(name, "hair");
    }

    #[test]
    fn test_find_wildcard_token_subfolder_and_dots() {
        let (_, _, name) = find_wildcard_token("__styles/v2.dark__").unwrap();
        assert_eq!(name, "styles/v2.dark");
    }

    #[test]
    fn test_find_wildcard_token_none() {
        assert!(find_wildcard_token("no tokens here").is_none());
        assert!(find_wildcard_token("__unterminated").is_none());
    }

    #[test]
    fn test_split_top_level_alternates() {
        assert_eq!(
            split_top_level_alternates("a| b |c"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_split_preserves_empty_alternates() {
        assert_eq!(split_top_level_alternates("a||"), vec!["a", "", ""]);
        assert_eq!(split_top_level_alternates(""), vec![""]);
    }

    #[test]
    fn test_split_ignores_nested_pipes() {
        assert_eq!(
            split_top_level_alternates("a|{b|c}|d"),
            vec!["a", "{b|c}", "d"]
        );
    }

    #[test]
    fn test_flatten_nested() {
        let mut leaves = flatten_brace_expression("{a|{b|c}}");
        leaves.sort();
        leaves.dedup();
        assert_eq!(leaves, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_flatten_cross_product() {
        assert_eq!(
            flatten_brace_expression("{a|b}{1|2}"),
            vec!["a1", "a2", "b1", "b2"]
        );
    }

    #[test]
    fn test_flatten_no_braces() {
        assert_eq!(flatten_brace_expression("plain"), vec!["plain"]);
    }

    #[test]
    fn test_flatten_unbalanced_left_untouched() {
        assert_eq!(flatten_brace_expression("{a|b"), vec!["{a|b"]);
        assert_eq!(flatten_brace_expression("{a|{b}"), vec!["{a|{b}"]);
        assert_eq!(flatten_brace_expression("}a{"), vec!["}a{"]);
    }

    #[test]
    fn test_is_mirror_token() {
        assert!(is_mirror_token("mood-mir"));
        assert!(!is_mirror_token("mood"));
        assert!(!is_mirror_token("mood-mirror"));
    }
}
