//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default bound on rule nesting accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options applied while turning JSON into a [`Rule`](crate::Rule) tree.
///
/// ```
/// let config: json_logic::LogicConfig = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
/// assert_eq!(config.max_depth, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogicConfig {
    /// Deepest nesting of operations and arrays the parser accepts.
    /// Evaluation recursion is bounded by the same figure.
    pub max_depth: usize,
}

impl Default for LogicConfig {
    fn default() -> Self {
        LogicConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LogicConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
