//! Pipeline specification types.
//!
//! A [`PipelineSpec`] describes graph parameters, the stopword vocabulary,
//! the normalization alphabet, and strictness settings. These types are the
//! input to the [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "graph": { "window_size": 4, "max_nodes": 20, "tie_break": "first_seen" },
//!   "stopwords": { "preset": "english", "add": ["said"], "remove": [] },
//!   "alphabet": { "chars": "abcdefghijklmnopqrstuvwxyz0123456789" },
//!   "categories": ["sport", "tech"],
//!   "strict": false
//! }
//! ```
//!
//! Numeric limits are signed so that negative values survive parsing and are
//! reported by validation instead of failing deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CographError, Result};
use crate::nlp::normalizer::{Alphabet, Normalizer};
use crate::nlp::stopwords::StopwordFilter;
use crate::types::{GraphConfig, TieBreak};

/// The only spec version this build understands
pub const SPEC_VERSION: u32 = 1;

/// Top-level pipeline specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    #[serde(default)]
    pub graph: GraphSpec,

    #[serde(default)]
    pub stopwords: StopwordSpec,

    #[serde(default)]
    pub alphabet: AlphabetSpec,

    /// Categories to load, in order. Omitted: every subdirectory.
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            graph: GraphSpec::default(),
            stopwords: StopwordSpec::default(),
            alphabet: AlphabetSpec::default(),
            categories: None,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Graph construction and presentation parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub window_size: Option<i64>,

    #[serde(default)]
    pub max_nodes: Option<i64>,

    #[serde(default)]
    pub tie_break: Option<TieBreak>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Built-in stopword vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopwordPreset {
    /// The closed English function-word list.
    #[default]
    English,
    /// No stopwords; only `add` entries are removed.
    None,
}

/// Stopword vocabulary: a preset adjusted by explicit additions/removals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopwordSpec {
    #[serde(default)]
    pub preset: Option<StopwordPreset>,

    #[serde(default)]
    pub add: Vec<String>,

    #[serde(default)]
    pub remove: Vec<String>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Normalization alphabet. Omitted `chars`: `a-z0-9`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlphabetSpec {
    #[serde(default)]
    pub chars: Option<String>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl PipelineSpec {
    /// Parse a spec from JSON text. Parsing does not validate.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve graph parameters, applying defaults for omitted fields.
    ///
    /// Out-of-range values are a configuration error, never clamped.
    pub fn graph_config(&self) -> Result<GraphConfig> {
        let defaults = GraphConfig::default();
        let cfg = GraphConfig {
            window_size: resolve_limit("window_size", self.graph.window_size, defaults.window_size)?,
            max_nodes: resolve_limit("max_nodes", self.graph.max_nodes, defaults.max_nodes)?,
            tie_break: self.graph.tie_break.unwrap_or_default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build the stopword filter this spec describes.
    pub fn stopword_filter(&self) -> StopwordFilter {
        let mut filter = match self.stopwords.preset.unwrap_or_default() {
            StopwordPreset::English => StopwordFilter::english(),
            StopwordPreset::None => StopwordFilter::empty(),
        };
        let add: Vec<&str> = self.stopwords.add.iter().map(String::as_str).collect();
        let remove: Vec<&str> = self.stopwords.remove.iter().map(String::as_str).collect();
        filter.add_stopwords(&add);
        filter.remove_stopwords(&remove);
        filter
    }

    /// Build the normalizer this spec describes.
    pub fn normalizer(&self) -> Normalizer {
        match &self.alphabet.chars {
            Some(chars) => Normalizer::with_alphabet(Alphabet::from_chars(chars.chars())),
            None => Normalizer::new(),
        }
    }
}

fn resolve_limit(field: &'static str, value: Option<i64>, default: usize) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(v) => usize::try_from(v).map_err(|_| CographError::InvalidConfig {
            field,
            value: v,
            reason: "must be at least 1",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let json = r#"{ "v": 1 }"#;
        let spec: PipelineSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.v, 1);
        assert!(spec.graph.window_size.is_none());
        assert!(spec.categories.is_none());
        assert!(!spec.strict);
        assert_eq!(spec.graph_config().unwrap(), GraphConfig::default());
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "graph": { "window_size": 3, "max_nodes": 15, "tie_break": "lexicographic" },
            "stopwords": { "preset": "english", "add": ["said"], "remove": ["not"] },
            "alphabet": { "chars": "abc" },
            "categories": ["sport", "tech"],
            "strict": true
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        let cfg = spec.graph_config().unwrap();
        assert_eq!(cfg.window_size, 3);
        assert_eq!(cfg.max_nodes, 15);
        assert_eq!(cfg.tie_break, TieBreak::Lexicographic);
        assert_eq!(spec.categories.as_deref(), Some(&["sport".to_string(), "tech".to_string()][..]));
        assert!(spec.strict);

        let filter = spec.stopword_filter();
        assert!(filter.is_stopword("said"));
        assert!(filter.is_stopword("the"));
        assert!(!filter.is_stopword("not"));

        assert_eq!(spec.normalizer().normalize("A-b-C-d"), "a b c");
    }

    #[test]
    fn test_negative_window_is_config_error() {
        let spec = PipelineSpec::from_json(r#"{ "v": 1, "graph": { "window_size": -2 } }"#).unwrap();
        let err = spec.graph_config().unwrap_err();
        assert!(matches!(
            err,
            CographError::InvalidConfig {
                field: "window_size",
                value: -2,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_max_nodes_is_config_error() {
        let spec = PipelineSpec::from_json(r#"{ "v": 1, "graph": { "max_nodes": 0 } }"#).unwrap();
        assert!(spec.graph_config().is_err());
    }

    #[test]
    fn test_none_preset_only_uses_additions() {
        let spec = PipelineSpec::from_json(
            r#"{ "v": 1, "stopwords": { "preset": "none", "add": ["Foo"] } }"#,
        )
        .unwrap();
        let filter = spec.stopword_filter();
        assert_eq!(filter.len(), 1);
        assert!(filter.is_stopword("foo"));
        assert!(!filter.is_stopword("the"));
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "graph": { "window": 3 },
            "stopwords": { "language": "de" }
        }"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.graph.unknown_fields.contains_key("window"));
        assert!(spec.stopwords.unknown_fields.contains_key("language"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = PipelineSpec::from_json("{ v: 1 }").unwrap_err();
        assert!(matches!(err, CographError::Json(_)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"v":1,"graph":{"window_size":5,"tie_break":"first_seen"}}"#;
        let spec = PipelineSpec::from_json(json).unwrap();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["graph"]["window_size"], 5);
        assert_eq!(back["graph"]["tie_break"], "first_seen");
    }
}
