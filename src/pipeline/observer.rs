//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.

use std::time::{Duration, Instant};

use crate::graph::builder::CooccurrenceGraph;
use crate::graph::ranking::GraphView;
use crate::types::Token;

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_FILTER: &str = "filter";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What happened in one stage: duration plus stage-specific sizes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    tokens: Option<usize>,
    nodes: Option<usize>,
    edges: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Tokens produced by the stage (tokenize / filter)
    pub fn tokens(&self) -> Option<usize> {
        self.tokens
    }

    pub fn nodes(&self) -> Option<usize> {
        self.nodes
    }

    pub fn edges(&self) -> Option<usize> {
        self.edges
    }
}

/// Fluent construction of a [`StageReport`] with optional metrics
#[derive(Debug, Clone, Copy)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn tokens(mut self, tokens: usize) -> Self {
        self.report.tokens = Some(tokens);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Stage-boundary callbacks. Every method defaults to a no-op.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_normalized(&mut self, _text: &str) {}
    fn on_tokens(&mut self, _tokens: &[Token]) {}
    fn on_filtered(&mut self, _tokens: &[Token]) {}
    fn on_graph(&mut self, _graph: &CooccurrenceGraph) {}
    fn on_view(&mut self, _view: &GraphView) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every finished stage, in order
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    /// Report for a stage, if it ran
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    /// Sum of all stage durations
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
