//! Expander configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration shared by an expander instance and any twin instance that
/// replays its decisions.
///
/// Two expanders constructed from equal configs, fed the same sequence of
/// decision points in the same order, always produce the same sequence of
/// choices. The mirror derivation depends on this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpanderConfig {
    /// Base seed for all deterministic choices.
    pub seed: u32,
    /// Directory containing the wildcard `.txt` files.
    pub wildcard_root: PathBuf,
    /// Variety lane. A non-zero lane selects an alternate deterministic
    /// sequence of choices without changing the seed; 0 means no lane suffix.
    #[serde(default)]
    pub variety: u32,
}

impl ExpanderConfig {
    /// Creates a config with the default variety lane (0).
    pub fn new(seed: u32, wildcard_root: impl Into<PathBuf>) -> Self {
        Self {
            seed,
            wildcard_root: wildcard_root.into(),
            variety: 0,
        }
    }

    /// Sets the variety lane.
    pub fn with_variety(mut self, variety: u32) -> Self {
        self.variety = variety;
        self
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
