//! Co-occurrence graph construction
//!
//! This module provides a mutable graph builder that interns tokens to dense
//! ids and uses FxHashMap for O(1) edge lookups during construction, and the
//! immutable [`CooccurrenceGraph`] it produces.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::Result;
use crate::types::{validate_window_size, Token};

/// Edge key: the two endpoint ids, smaller id first
type EdgeKey = (u32, u32);

#[inline]
fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A node: a distinct token and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// The token for this node
    pub token: Token,
    /// Occurrences across the whole sequence
    pub count: u32,
}

/// An undirected weighted edge, endpoints in lexicographic order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub weight: u32,
}

/// A mutable graph builder for one token sequence
#[derive(Debug)]
pub struct GraphBuilder {
    window_size: usize,
    /// Maps token -> node ID (IDs are assigned in first-seen order)
    token_to_id: FxHashMap<Token, u32>,
    /// Node storage
    nodes: Vec<GraphNode>,
    /// Undirected edge weights
    edges: FxHashMap<EdgeKey, u32>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    ///
    /// Fails if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        Self::with_capacity(window_size, 0)
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(window_size: usize, node_capacity: usize) -> Result<Self> {
        validate_window_size(window_size)?;
        Ok(Self {
            window_size,
            token_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
            edges: FxHashMap::default(),
        })
    }

    /// The configured window width
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Get or create a node for the given token, returning its ID
    ///
    /// A fresh node starts at count zero, so callers must follow up with an
    /// occurrence.
    fn get_or_create_node(&mut self, token: &str) -> u32 {
        if let Some(&id) = self.token_to_id.get(token) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.token_to_id.insert(token.to_string(), id);
        self.nodes.push(GraphNode {
            token: token.to_string(),
            count: 0,
        });
        id
    }

    /// Record one occurrence of a token, returning its ID
    fn record_occurrence(&mut self, token: &str) -> u32 {
        let id = self.get_or_create_node(token);
        self.nodes[id as usize].count += 1;
        id
    }

    /// Increment the edge weight between two interned nodes by one
    fn increment_edge(&mut self, a: u32, b: u32) {
        if a == b {
            return; // No self-loops
        }
        *self.edges.entry(edge_key(a, b)).or_insert(0) += 1;
    }

    /// Add a token sequence: count every token, then walk the anchored windows.
    ///
    /// Every index anchors its own window `ids[i..min(i + window_size, n)]`
    /// and every position pair inside it holding two different tokens adds
    /// one to their edge. Windows overlap and are not deduplicated, so a pair
    /// `p < q` is counted once for every anchor in
    /// `max(0, q + 1 - window_size)..=p`.
    pub fn add_sequence<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let ids: Vec<u32> = tokens
            .iter()
            .map(|t| self.record_occurrence(t.as_ref()))
            .collect();

        let n = ids.len();
        for anchor in 0..n {
            let end = std::cmp::min(anchor + self.window_size, n);
            for a in anchor..end {
                for b in (a + 1)..end {
                    self.increment_edge(ids[a], ids[b]);
                }
            }
        }
    }

    /// Build a graph from a token sequence in one call
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], window_size: usize) -> Result<CooccurrenceGraph> {
        let mut builder = Self::with_capacity(window_size, tokens.len() / 2)?;
        builder.add_sequence(tokens);
        Ok(builder.build())
    }

    /// Get the number of nodes so far
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct edges so far
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Freeze the builder into an immutable graph
    pub fn build(self) -> CooccurrenceGraph {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            window_size = self.window_size,
            "built co-occurrence graph"
        );
        CooccurrenceGraph {
            token_to_id: self.token_to_id,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// A weighted undirected co-occurrence graph
///
/// Node weight is token frequency; edge weight is the number of anchored
/// windows in which the two tokens co-occurred. Node IDs follow first-seen
/// order in the source sequence.
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceGraph {
    token_to_id: FxHashMap<Token, u32>,
    nodes: Vec<GraphNode>,
    edges: FxHashMap<EdgeKey, u32>,
}

impl CooccurrenceGraph {
    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&GraphNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by token
    pub fn get_node_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Get the token for a node ID
    pub fn token(&self, id: u32) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.token.as_str())
    }

    /// Occurrence count of a token, if present
    pub fn frequency(&self, token: &str) -> Option<u32> {
        self.get_node_id(token).map(|id| self.nodes[id as usize].count)
    }

    /// Edge weight between two tokens, in either order
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<u32> {
        let a = self.get_node_id(a)?;
        let b = self.get_node_id(b)?;
        if a == b {
            return None;
        }
        self.edges.get(&edge_key(a, b)).copied()
    }

    /// Iterate over all nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &GraphNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Iterate over all edges (arbitrary order)
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> {
        self.edges.iter().map(move |(&(a, b), &weight)| {
            let ta = self.nodes[a as usize].token.as_str();
            let tb = self.nodes[b as usize].token.as_str();
            let (source, target) = if ta < tb { (ta, tb) } else { (tb, ta) };
            Edge {
                source,
                target,
                weight,
            }
        })
    }

    /// All edges sorted by (source, target)
    pub fn sorted_edges(&self) -> Vec<Edge<'_>> {
        let mut edges: Vec<_> = self.edges().collect();
        edges.sort_unstable_by(|x, y| (x.source, x.target).cmp(&(y.source, y.target)));
        edges
    }

    /// Sum of all node counts (length of the source sequence)
    pub fn total_occurrences(&self) -> u64 {
        self.nodes.iter().map(|n| n.count as u64).sum()
    }
}

/// Build one graph per token sequence in parallel
///
/// Sequences are independent (one per category), so each goes to its own
/// rayon task. Results come back in input order.
pub fn build_graphs_parallel<S>(sequences: &[Vec<S>], window_size: usize) -> Result<Vec<CooccurrenceGraph>>
where
    S: AsRef<str> + Sync,
{
    validate_window_size(window_size)?;
    sequences
        .par_iter()
        .map(|tokens| GraphBuilder::from_tokens(tokens, window_size))
        .collect()
}
