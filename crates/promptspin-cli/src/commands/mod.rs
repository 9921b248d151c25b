//! CLI command implementations

pub mod choices;
pub mod expand;
pub mod list;
pub mod resolve;

use std::path::PathBuf;

/// Resolves the wildcard root: the given directory, or `./wildcards` when
/// none was passed.
pub(crate) fn wildcard_root(dir: Option<&str>) -> PathBuf {
    match dir {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => PathBuf::from("wildcards"),
    }
}
