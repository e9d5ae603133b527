//! Pipeline outputs.
//!
//! Intermediate text and token sequences are handed to observers as they are
//! produced and then dropped; only sizes survive into the output.

use crate::graph::builder::CooccurrenceGraph;
use crate::graph::ranking::GraphView;

/// Result of running the pipeline over one text
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Tokens before stopword filtering
    pub token_count: usize,
    /// Tokens that reached the graph builder
    pub kept_token_count: usize,
    /// The full co-occurrence graph
    pub graph: CooccurrenceGraph,
    /// Top-N view for presentation
    pub view: GraphView,
}

/// Pipeline output for one corpus category
#[derive(Debug, Clone)]
pub struct CategoryOutput {
    pub label: String,
    pub documents: usize,
    pub output: PipelineOutput,
}
