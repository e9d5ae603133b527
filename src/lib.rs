//! # rapid-cograph
//!
//! Sliding-window word co-occurrence graphs over categorized text corpora.
//!
//! Raw text flows through a fixed chain of stages:
//!
//! 1. [`Normalizer`] lowercases and keeps only the configured alphabet
//! 2. [`Tokenizer`] splits on single spaces
//! 3. [`StopwordFilter`] drops common English words
//! 4. [`GraphBuilder`] counts co-occurrences in anchored windows
//! 5. [`TopNSelector`] keeps the most frequent words for presentation
//!
//! ## Quick start
//!
//! ```
//! use rapid_cograph::{NoopObserver, StandardPipeline};
//!
//! let pipeline = StandardPipeline::standard();
//! let out = pipeline.run("The cat sat. The dog ran!", &mut NoopObserver).unwrap();
//! assert_eq!(out.graph.edge_weight("dog", "ran"), Some(3));
//! ```
//!
//! ## Corpora
//!
//! [`CorpusLoader`] reads one directory per category; [`Pipeline::run_corpus`]
//! then builds one graph per category in parallel.

pub mod corpus;
pub mod errors;
pub mod graph;
pub mod nlp;
pub mod pipeline;
pub mod types;

pub use corpus::{Category, Corpus, CorpusLoader, BBC_NEWS_CATEGORIES};
pub use errors::{CographError, Result};
pub use graph::builder::{CooccurrenceGraph, Edge, GraphBuilder, GraphNode};
pub use graph::layout::{CircularLayout, NodePosition};
pub use graph::ranking::{GraphView, RankedNode, TopNSelector};
pub use nlp::normalizer::{Alphabet, Normalizer};
pub use nlp::stopwords::{StopwordFilter, ENGLISH_STOPWORDS};
pub use nlp::tokenizer::Tokenizer;
pub use pipeline::artifacts::{CategoryOutput, PipelineOutput};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimingObserver};
pub use pipeline::runner::{Pipeline, PipelineBuilder, StandardPipeline};
pub use pipeline::spec::PipelineSpec;
pub use types::{GraphConfig, TieBreak, Token};
