//! Error types for wildcard resolution.
//!
//! The expansion engine itself never surfaces these: every resolution failure
//! degrades to "zero options" and the token is dropped from the output. The
//! checked resolver keeps the cause around so diagnostic callers (the CLI's
//! `resolve` command) can explain *why* a token produced nothing.

use std::path::PathBuf;
use thiserror::Error;

/// Why a wildcard token failed to resolve to any options.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The token name is empty after normalization or contains a
    /// parent-directory segment.
    #[error("wildcard token '{token}' is not a safe path under the wildcard root")]
    UnsafeToken {
        /// The raw token name as written in the template.
        token: String,
    },

    /// No wildcard file exists for this token.
    #[error("no wildcard file for token '{token}'")]
    NotFound {
        /// The raw token name as written in the template.
        token: String,
    },

    /// The wildcard file exists but could not be read.
    #[error("failed to read wildcard file {}: {source}", path.display())]
    Io {
        /// The resolved file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
