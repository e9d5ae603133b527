//! Core types shared across the crate
//!
//! Tokens are plain owned strings; the interesting shared state is the
//! graph configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{CographError, Result};

/// A single normalized word token (`[a-z0-9]+` under the default alphabet)
pub type Token = String;

/// Default sliding-window width, in tokens
pub const DEFAULT_WINDOW_SIZE: usize = 4;

/// Default number of nodes kept for presentation
pub const DEFAULT_MAX_NODES: usize = 20;

/// How to order nodes that share the same frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier first occurrence in the token sequence wins
    #[default]
    FirstSeen,
    /// Lexicographically smaller token wins
    Lexicographic,
}

impl TieBreak {
    /// Returns the user-facing name used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSeen => "first_seen",
            Self::Lexicographic => "lexicographic",
        }
    }
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "first_seen" | "first-seen" | "firstseen" => Ok(Self::FirstSeen),
            "lexicographic" | "lex" | "alpha" => Ok(Self::Lexicographic),
            other => Err(format!("unknown tie-break '{other}'")),
        }
    }
}

/// Parameters for graph construction and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Width of each anchored co-occurrence window (must be >= 1)
    pub window_size: usize,
    /// Number of top-frequency nodes kept for presentation (must be >= 1)
    pub max_nodes: usize,
    /// Ordering among nodes with equal frequency
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_nodes: DEFAULT_MAX_NODES,
            tie_break: TieBreak::default(),
        }
    }
}

impl GraphConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the number of presented nodes
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set the tie-break policy
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Reject out-of-range parameters instead of clamping them.
    pub fn validate(&self) -> Result<()> {
        validate_window_size(self.window_size)?;
        validate_max_nodes(self.max_nodes)?;
        Ok(())
    }
}

pub(crate) fn validate_window_size(window_size: usize) -> Result<()> {
    if window_size < 1 {
        return Err(CographError::InvalidConfig {
            field: "window_size",
            value: window_size as i64,
            reason: "must be at least 1",
        });
    }
    Ok(())
}

pub(crate) fn validate_max_nodes(max_nodes: usize) -> Result<()> {
    if max_nodes < 1 {
        return Err(CographError::InvalidConfig {
            field: "max_nodes",
            value: max_nodes as i64,
            reason: "must be at least 1",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.window_size, 4);
        assert_eq!(cfg.max_nodes, 20);
        assert_eq!(cfg.tie_break, TieBreak::FirstSeen);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = GraphConfig::new().with_window_size(0).validate().unwrap_err();
        assert!(matches!(
            err,
            CographError::InvalidConfig {
                field: "window_size",
                value: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_max_nodes_rejected() {
        let err = GraphConfig::new().with_max_nodes(0).validate().unwrap_err();
        assert!(err.to_string().contains("max_nodes"));
    }

    #[test]
    fn test_tie_break_parse() {
        assert_eq!("first-seen".parse::<TieBreak>(), Ok(TieBreak::FirstSeen));
        assert_eq!("Lexicographic".parse::<TieBreak>(), Ok(TieBreak::Lexicographic));
        assert!("random".parse::<TieBreak>().is_err());
    }

    #[test]
    fn test_config_deserialize_without_tie_break() {
        let cfg: GraphConfig =
            serde_json::from_str(r#"{ "window_size": 3, "max_nodes": 10 }"#).unwrap();
        assert_eq!(cfg.window_size, 3);
        assert_eq!(cfg.tie_break, TieBreak::FirstSeen);
    }
}
