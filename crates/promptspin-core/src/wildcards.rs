//! Wildcard file resolution.
//!
//! A wildcard token resolves to exactly one `.txt` file under the configured
//! root directory. File content becomes an ordered list of option strings
//! according to the single-line-vs-multi-line rules; everything that can go
//! wrong degrades to "zero options" from the engine's point of view.
//!
//! Lookup is strict in both directions: a mirror-suffixed token never falls
//! back to the non-suffixed file, and a plain token is never redirected to a
//! suffixed file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::grammar::{self, is_mirror_token};

/// Line prefix marking a comment in a wildcard file.
const COMMENT_MARKER: char = '#';

/// Resolves wildcard tokens against a directory of `.txt` files.
#[derive(Debug, Clone)]
pub struct WildcardStore {
    root: PathBuf,
}

impl WildcardStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a token to its ordered option list.
    ///
    /// Infallible: a missing file, an unsafe token name, or a read failure
    /// all resolve to an empty list, which the engine treats as "drop the
    /// token silently".
    pub fn resolve_options(&self, token: &str) -> Vec<String> {
        self.resolve_options_checked(token).unwrap_or_default()
    }

    /// Resolves a token, reporting why resolution produced nothing.
    ///
    /// Same resolution rules as [`resolve_options`](Self::resolve_options);
    /// used by diagnostic callers that want the cause instead of silence.
    pub fn resolve_options_checked(&self, token: &str) -> Result<Vec<String>, ResolveError> {
        let relative = normalize_token(token).ok_or_else(|| ResolveError::UnsafeToken {
            token: token.to_string(),
        })?;
        let path = self.root.join(format!("{}.txt", relative));
        if !path.is_file() {
            return Err(ResolveError::NotFound {
                token: token.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(parse_options(&content, is_mirror_token(token)))
    }
}

/// Normalizes a token name into a relative path confined under the root.
///
/// Backslashes become forward slashes; empty and `.` segments are dropped
/// (which also strips leading slashes and `./` prefixes). Any segment equal
/// to `..` rejects the whole token, before any stripping, so a traversal
/// attempt can never be laundered into a safe-looking path.
pub(crate) fn normalize_token(token: &str) -> Option<String> {
    let slashed = token.replace('\\', "/");
    let mut segments = Vec::new();
    for segment in slashed.split('/') {
        if segment == ".." {
            return None;
        }
        if segment.is_empty() || segment == "." {
            continue;
        }
        segments.push(segment);
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}

/// Parses wildcard file content into an ordered option list.
///
/// Lines are stripped of trailing whitespace; blank lines and lines starting
/// with `#` are discarded. Multiple surviving lines are each one option
/// verbatim. A single surviving line with brace syntax is either fully
/// flattened (mirror tokens) or split on its top-level alternates (ordinary
/// tokens); braces inside multi-line options are left for a later brace pass.
fn parse_options(content: &str, mirror: bool) -> Vec<String> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .collect();

    match lines.as_slice() {
        [] => Vec::new(),
        [line] => {
            if !line.contains(['{', '}']) {
                vec![line.to_string()]
            } else if mirror {
                dedup_case_insensitive(grammar::flatten_brace_expression(line))
            } else {
                grammar::split_top_level_alternates(line)
            }
        }
        many => many.iter().map(|line| line.to_string()).collect(),
    }
}

/// Removes case-insensitive duplicates, keeping first appearances in order.
pub(crate) fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.to_lowercase()) {
            out.push(item);
        }
    }
    out
}
