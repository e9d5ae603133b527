//! Frequency ranking and the presentation view
//!
//! [`TopNSelector`] orders nodes by occurrence count with an explicit
//! tie-break, and [`GraphView`] restricts the graph to the selected nodes for
//! rendering.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::builder::CooccurrenceGraph;
use super::layout::{CircularLayout, NodePosition};
use crate::errors::Result;
use crate::types::{validate_max_nodes, GraphConfig, TieBreak, Token, DEFAULT_MAX_NODES};

/// A node as ranked for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedNode {
    /// 1-based rank
    pub rank: usize,
    pub token: Token,
    pub count: u32,
}

/// Selects the most frequent nodes of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopNSelector {
    max_nodes: usize,
    tie_break: TieBreak,
}

impl Default for TopNSelector {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            tie_break: TieBreak::default(),
        }
    }
}

impl TopNSelector {
    /// Create a selector keeping at most `max_nodes` nodes
    ///
    /// Fails if `max_nodes` is zero.
    pub fn new(max_nodes: usize) -> Result<Self> {
        validate_max_nodes(max_nodes)?;
        Ok(Self {
            max_nodes,
            tie_break: TieBreak::default(),
        })
    }

    /// Create a selector from the presentation half of a config
    pub fn from_config(cfg: &GraphConfig) -> Result<Self> {
        Ok(Self::new(cfg.max_nodes)?.with_tie_break(cfg.tie_break))
    }

    /// Set the tie-break policy
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Rank nodes by count descending and keep the first `max_nodes`.
    ///
    /// Ties are settled by the configured [`TieBreak`], so the result never
    /// depends on hash-map iteration order.
    pub fn select(&self, graph: &CooccurrenceGraph) -> Vec<RankedNode> {
        let mut nodes: Vec<_> = graph.nodes().collect();

        nodes.sort_by(|(id_a, a), (id_b, b)| {
            b.count.cmp(&a.count).then_with(|| match self.tie_break {
                TieBreak::FirstSeen => id_a.cmp(id_b),
                TieBreak::Lexicographic => a.token.cmp(&b.token),
            })
        });
        nodes.truncate(self.max_nodes);

        nodes
            .into_iter()
            .enumerate()
            .map(|(i, (_, node))| RankedNode {
                rank: i + 1,
                token: node.token.clone(),
                count: node.count,
            })
            .collect()
    }

    /// Build the presentation view: top nodes, their circular layout, and
    /// only the edges whose endpoints were both selected.
    pub fn view(&self, graph: &CooccurrenceGraph, layout: &CircularLayout) -> GraphView {
        let ranked = self.select(graph);
        let selected: FxHashSet<&str> = ranked.iter().map(|n| n.token.as_str()).collect();

        let mut edges: Vec<ViewEdge> = graph
            .edges()
            .filter(|e| selected.contains(e.source) && selected.contains(e.target))
            .map(|e| ViewEdge {
                source: e.source.to_string(),
                target: e.target.to_string(),
                weight: e.weight,
            })
            .collect();
        edges.sort_by(ViewEdge::by_weight_desc);

        let positions = layout.positions(ranked.len());
        let nodes = ranked
            .into_iter()
            .zip(positions)
            .map(|(node, position)| PlacedNode { node, position })
            .collect();

        GraphView {
            nodes,
            edges,
            total_nodes: graph.node_count(),
            total_edges: graph.edge_count(),
        }
    }
}

/// A ranked node with its canvas position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    #[serde(flatten)]
    pub node: RankedNode,
    pub position: NodePosition,
}

/// An edge between two selected nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    pub source: Token,
    pub target: Token,
    pub weight: u32,
}

impl ViewEdge {
    fn by_weight_desc(a: &Self, b: &Self) -> Ordering {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    }
}

/// Everything a renderer needs for one graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    /// Selected nodes in rank order
    pub nodes: Vec<PlacedNode>,
    /// Edges among the selected nodes, heaviest first
    pub edges: Vec<ViewEdge>,
    /// Node count of the full graph
    pub total_nodes: usize,
    /// Edge count of the full graph
    pub total_edges: usize,
}

impl GraphView {
    /// Tokens of the selected nodes, in rank order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.node.token.as_str())
    }
}
