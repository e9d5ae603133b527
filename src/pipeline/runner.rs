//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds a statically-composed set of text stages
//! plus the graph configuration. Calling [`Pipeline::run`] executes them in
//! order (normalize, tokenize, filter, build graph, rank), notifying a
//! [`PipelineObserver`] at each boundary.
//!
//! # Static dispatch
//!
//! `Pipeline` is generic over the text stages, so the compiler monomorphizes
//! each combination into a unique concrete type. Stage values are immutable
//! once built, so one pipeline can serve many categories concurrently.
//!
//! # Construction
//!
//! Use [`Pipeline::standard()`] for the default English pipeline,
//! [`Pipeline::from_spec()`] for a JSON-configured one, or
//! [`PipelineBuilder`] to swap individual stages.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::corpus::{Category, Corpus};
use crate::errors::{CographError, Result};
use crate::graph::builder::GraphBuilder;
use crate::graph::layout::CircularLayout;
use crate::graph::ranking::TopNSelector;
use crate::nlp::normalizer::Normalizer;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::Tokenizer;
use crate::pipeline::artifacts::{CategoryOutput, PipelineOutput};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_FILTER,
    STAGE_GRAPH, STAGE_NORMALIZE, STAGE_RANK, STAGE_TOKENIZE,
};
use crate::pipeline::spec::PipelineSpec;
use crate::pipeline::traits::{TextNormalizer, TextTokenizer, TokenFilter};
use crate::pipeline::validation::ValidationEngine;
use crate::types::{GraphConfig, TieBreak};

/// Enter a tracing span for a pipeline stage (with the `stage-spans`
/// feature). The span closes at the end of the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "stage-spans")]
        let _span = tracing::debug_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline: statically-composed stage container
// ============================================================================

/// A pipeline composed of concrete stage implementations.
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `N` | [`TextNormalizer`] | [`Normalizer`] |
/// | `T` | [`TextTokenizer`] | [`Tokenizer`] |
/// | `F` | [`TokenFilter`] | [`StopwordFilter`] |
#[derive(Debug, Clone)]
pub struct Pipeline<N = Normalizer, T = Tokenizer, F = StopwordFilter> {
    normalizer: N,
    tokenizer: T,
    filter: F,
    config: GraphConfig,
    selector: TopNSelector,
    layout: CircularLayout,
}

/// The default English pipeline.
pub type StandardPipeline = Pipeline<Normalizer, Tokenizer, StopwordFilter>;

impl StandardPipeline {
    /// `a-z0-9` alphabet, English stopwords, window 4, top 20.
    pub fn standard() -> Self {
        Pipeline {
            normalizer: Normalizer::new(),
            tokenizer: Tokenizer::new(),
            filter: StopwordFilter::english(),
            config: GraphConfig::default(),
            selector: TopNSelector::default(),
            layout: CircularLayout::new(),
        }
    }

    /// Build a pipeline from a spec.
    ///
    /// The spec is validated first; every error is returned together in
    /// [`CographError::InvalidSpec`]. Warnings are logged.
    pub fn from_spec(spec: &PipelineSpec) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(spec);
        for warning in report.warnings() {
            warn!(%warning, "pipeline spec warning");
        }
        if report.has_errors() {
            return Err(CographError::InvalidSpec(report));
        }

        PipelineBuilder::new()
            .normalizer(spec.normalizer())
            .filter(spec.stopword_filter())
            .config(spec.graph_config()?)
            .build()
    }
}

impl Default for StandardPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl<N, T, F> Pipeline<N, T, F> {
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }
}

// ============================================================================
// Pipeline::run: execute stages in order
// ============================================================================

impl<N, T, F> Pipeline<N, T, F>
where
    N: TextNormalizer,
    T: TextTokenizer,
    F: TokenFilter,
{
    /// Execute the pipeline over one raw text.
    ///
    /// Stages run in order:
    /// 1. Normalize
    /// 2. Tokenize
    /// 3. Filter (stopwords)
    /// 4. Build graph
    /// 5. Rank (top-N view)
    ///
    /// The `observer` receives callbacks at each stage boundary. Pass
    /// [`NoopObserver`] for zero-overhead execution.
    pub fn run(&self, raw: &str, observer: &mut impl PipelineObserver) -> Result<PipelineOutput> {
        // Stage 0: Normalize
        observer.on_stage_start(STAGE_NORMALIZE);
        let clock = StageClock::start();
        let normalized = {
            trace_stage!(STAGE_NORMALIZE);
            self.normalizer.normalize(raw)
        };
        observer.on_stage_end(STAGE_NORMALIZE, &StageReport::new(clock.elapsed()));
        observer.on_normalized(&normalized);

        // Stage 1: Tokenize
        observer.on_stage_start(STAGE_TOKENIZE);
        let clock = StageClock::start();
        let tokens = {
            trace_stage!(STAGE_TOKENIZE);
            self.tokenizer.tokenize(&normalized)
        };
        drop(normalized);
        let token_count = tokens.len();
        let report = StageReportBuilder::new(clock.elapsed())
            .tokens(token_count)
            .build();
        observer.on_stage_end(STAGE_TOKENIZE, &report);
        observer.on_tokens(&tokens);

        // Stage 2: Filter
        observer.on_stage_start(STAGE_FILTER);
        let clock = StageClock::start();
        let kept = {
            trace_stage!(STAGE_FILTER);
            self.filter.apply(tokens)
        };
        let report = StageReportBuilder::new(clock.elapsed())
            .tokens(kept.len())
            .build();
        observer.on_stage_end(STAGE_FILTER, &report);
        observer.on_filtered(&kept);

        // Stage 3: Build graph
        observer.on_stage_start(STAGE_GRAPH);
        let clock = StageClock::start();
        let graph = {
            trace_stage!(STAGE_GRAPH);
            GraphBuilder::from_tokens(&kept, self.config.window_size)?
        };
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.node_count())
            .edges(graph.edge_count())
            .build();
        observer.on_stage_end(STAGE_GRAPH, &report);
        observer.on_graph(&graph);

        // Stage 4: Rank
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let view = {
            trace_stage!(STAGE_RANK);
            self.selector.view(&graph, &self.layout)
        };
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(view.nodes.len())
            .edges(view.edges.len())
            .build();
        observer.on_stage_end(STAGE_RANK, &report);
        observer.on_view(&view);

        debug!(
            tokens = token_count,
            kept = kept.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            token_count,
            kept_token_count: kept.len(),
            graph,
            view,
        })
    }

    /// Run over a category's documents merged with single spaces.
    pub fn run_category(
        &self,
        category: &Category,
        observer: &mut impl PipelineObserver,
    ) -> Result<CategoryOutput> {
        let output = self.run(&category.merged_text(), observer)?;
        info!(
            category = %category.label,
            documents = category.len(),
            nodes = output.graph.node_count(),
            edges = output.graph.edge_count(),
            "category graph ready"
        );
        Ok(CategoryOutput {
            label: category.label.clone(),
            documents: category.len(),
            output,
        })
    }
}

impl<N, T, F> Pipeline<N, T, F>
where
    N: TextNormalizer + Sync,
    T: TextTokenizer + Sync,
    F: TokenFilter + Sync,
{
    /// Run every category of a corpus, one rayon task per category.
    ///
    /// Categories share no state, so results are identical to running them
    /// one by one; they come back in corpus order.
    pub fn run_corpus(&self, corpus: &Corpus) -> Result<Vec<CategoryOutput>> {
        corpus
            .categories
            .par_iter()
            .map(|category| self.run_category(category, &mut NoopObserver))
            .collect()
    }
}

// ============================================================================
// PipelineBuilder: fluent construction with custom stages
// ============================================================================

/// Fluent builder for constructing a [`Pipeline`] with custom stages.
///
/// Starts from the standard stages and default configuration and allows
/// overriding each. Configuration is validated by [`build`](Self::build).
///
/// ```
/// # use rapid_cograph::pipeline::runner::PipelineBuilder;
/// # use rapid_cograph::pipeline::traits::NoopFilter;
/// let pipeline = PipelineBuilder::new()
///     .filter(NoopFilter)
///     .window_size(2)
///     .build()
///     .unwrap();
/// assert_eq!(pipeline.config().window_size, 2);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineBuilder<N = Normalizer, T = Tokenizer, F = StopwordFilter> {
    normalizer: N,
    tokenizer: T,
    filter: F,
    config: GraphConfig,
    layout: CircularLayout,
}

impl PipelineBuilder {
    /// Start building from the standard stages.
    pub fn new() -> Self {
        PipelineBuilder {
            normalizer: Normalizer::new(),
            tokenizer: Tokenizer::new(),
            filter: StopwordFilter::english(),
            config: GraphConfig::default(),
            layout: CircularLayout::new(),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T, F> PipelineBuilder<N, T, F> {
    /// Override the normalizer stage.
    pub fn normalizer<M: TextNormalizer>(self, n: M) -> PipelineBuilder<M, T, F> {
        PipelineBuilder {
            normalizer: n,
            tokenizer: self.tokenizer,
            filter: self.filter,
            config: self.config,
            layout: self.layout,
        }
    }

    /// Override the tokenizer stage.
    pub fn tokenizer<U: TextTokenizer>(self, t: U) -> PipelineBuilder<N, U, F> {
        PipelineBuilder {
            normalizer: self.normalizer,
            tokenizer: t,
            filter: self.filter,
            config: self.config,
            layout: self.layout,
        }
    }

    /// Override the token filter stage.
    pub fn filter<G: TokenFilter>(self, f: G) -> PipelineBuilder<N, T, G> {
        PipelineBuilder {
            normalizer: self.normalizer,
            tokenizer: self.tokenizer,
            filter: f,
            config: self.config,
            layout: self.layout,
        }
    }

    /// Replace the whole graph configuration.
    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn window_size(mut self, window_size: usize) -> Self {
        self.config.window_size = window_size;
        self
    }

    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.config.max_nodes = max_nodes;
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    pub fn layout(mut self, layout: CircularLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Validate the configuration and produce a [`Pipeline`].
    pub fn build(self) -> Result<Pipeline<N, T, F>> {
        self.config.validate()?;
        Ok(Pipeline {
            normalizer: self.normalizer,
            tokenizer: self.tokenizer,
            filter: self.filter,
            selector: TopNSelector::from_config(&self.config)?,
            config: self.config,
            layout: self.layout,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::CooccurrenceGraph;
    use crate::pipeline::observer::StageTimingObserver;
    use crate::pipeline::traits::NoopFilter;
    use crate::types::Token;

    /// Observer that captures every intermediate artifact.
    #[derive(Default)]
    struct ArtifactObserver {
        normalized: Option<String>,
        tokens: Option<Vec<Token>>,
        filtered: Option<Vec<Token>>,
        saw_graph: bool,
        saw_view: bool,
    }

    impl PipelineObserver for ArtifactObserver {
        fn on_normalized(&mut self, text: &str) {
            self.normalized = Some(text.to_string());
        }
        fn on_tokens(&mut self, tokens: &[Token]) {
            self.tokens = Some(tokens.to_vec());
        }
        fn on_filtered(&mut self, tokens: &[Token]) {
            self.filtered = Some(tokens.to_vec());
        }
        fn on_graph(&mut self, _graph: &CooccurrenceGraph) {
            self.saw_graph = true;
        }
        fn on_view(&mut self, _view: &crate::graph::ranking::GraphView) {
            self.saw_view = true;
        }
    }

    #[test]
    fn test_standard_pipeline_constructs() {
        let pipeline = StandardPipeline::standard();
        assert_eq!(*pipeline.config(), GraphConfig::default());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let pipeline = StandardPipeline::standard();
        let mut obs = ArtifactObserver::default();

        let out = pipeline.run("The cat sat. The dog ran!", &mut obs).unwrap();

        assert_eq!(obs.normalized.as_deref(), Some("the cat sat the dog ran"));
        assert_eq!(
            obs.tokens.unwrap(),
            vec!["the", "cat", "sat", "the", "dog", "ran"]
        );
        assert_eq!(obs.filtered.unwrap(), vec!["cat", "sat", "dog", "ran"]);
        assert!(obs.saw_graph);
        assert!(obs.saw_view);

        assert_eq!(out.token_count, 6);
        assert_eq!(out.kept_token_count, 4);
        let g = &out.graph;
        assert_eq!(g.node_count(), 4);
        for t in ["cat", "sat", "dog", "ran"] {
            assert_eq!(g.frequency(t), Some(1));
        }
        assert_eq!(g.frequency("the"), None);
        assert_eq!(g.edge_weight("cat", "sat"), Some(1));
        assert_eq!(g.edge_weight("cat", "dog"), Some(1));
        assert_eq!(g.edge_weight("cat", "ran"), Some(1));
        assert_eq!(g.edge_weight("sat", "dog"), Some(2));
        assert_eq!(g.edge_weight("sat", "ran"), Some(2));
        assert_eq!(g.edge_weight("dog", "ran"), Some(3));
        assert_eq!(g.edge_count(), 6);
    }

    #[test]
    fn test_pipeline_run_with_timing_observer() {
        let pipeline = StandardPipeline::standard();
        let mut obs = StageTimingObserver::new();

        pipeline.run("Rust is a systems programming language", &mut obs).unwrap();

        let stage_names: Vec<&str> = obs.reports().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            stage_names,
            vec![STAGE_NORMALIZE, STAGE_TOKENIZE, STAGE_FILTER, STAGE_GRAPH, STAGE_RANK]
        );
        assert_eq!(obs.report(STAGE_TOKENIZE).unwrap().tokens(), Some(6));
        // "is" and "a" are stopwords.
        assert_eq!(obs.report(STAGE_FILTER).unwrap().tokens(), Some(4));
        let graph_report = obs.report(STAGE_GRAPH).unwrap();
        assert_eq!(graph_report.nodes(), Some(4));
        assert!(graph_report.edges().is_some());
    }

    #[test]
    fn test_pipeline_run_empty_input() {
        let pipeline = StandardPipeline::standard();
        let out = pipeline.run("", &mut NoopObserver).unwrap();
        assert!(out.graph.is_empty());
        assert!(out.view.nodes.is_empty());
        assert_eq!(out.token_count, 0);
    }

    #[test]
    fn test_only_stopwords_gives_empty_graph() {
        let pipeline = StandardPipeline::standard();
        let out = pipeline.run("The, and... OF it!", &mut NoopObserver).unwrap();
        assert_eq!(out.token_count, 4);
        assert_eq!(out.kept_token_count, 0);
        assert!(out.graph.is_empty());
    }

    #[test]
    fn test_builder_with_custom_stages() {
        let pipeline = PipelineBuilder::new()
            .filter(NoopFilter)
            .window_size(2)
            .max_nodes(2)
            .build()
            .unwrap();

        let out = pipeline.run("the cat the cat the", &mut NoopObserver).unwrap();
        assert_eq!(out.graph.frequency("the"), Some(3));
        // Window of two: four adjacent pairs, all "the"/"cat".
        assert_eq!(out.graph.edge_weight("the", "cat"), Some(4));
        assert_eq!(out.view.tokens().collect::<Vec<_>>(), vec!["the", "cat"]);
    }

    #[test]
    fn test_builder_rejects_zero_window() {
        let err = PipelineBuilder::new().window_size(0).build().unwrap_err();
        assert!(matches!(err, CographError::InvalidConfig { field: "window_size", .. }));
    }

    #[test]
    fn test_builder_rejects_zero_max_nodes() {
        assert!(PipelineBuilder::new().max_nodes(0).build().is_err());
    }

    #[test]
    fn test_from_spec_applies_settings() {
        let spec = PipelineSpec::from_json(
            r#"{
                "v": 1,
                "graph": { "window_size": 2, "max_nodes": 1 },
                "stopwords": { "add": ["cat"] }
            }"#,
        )
        .unwrap();
        let pipeline = StandardPipeline::from_spec(&spec).unwrap();
        let out = pipeline.run("The cat sat. The dog ran!", &mut NoopObserver).unwrap();

        assert_eq!(out.kept_token_count, 3);
        assert_eq!(out.graph.edge_weight("sat", "ran"), None);
        assert_eq!(out.view.nodes.len(), 1);
    }

    #[test]
    fn test_from_spec_collects_all_errors() {
        let spec = PipelineSpec::from_json(
            r#"{ "v": 1, "graph": { "window_size": 0, "max_nodes": -5 } }"#,
        )
        .unwrap();
        match StandardPipeline::from_spec(&spec) {
            Err(CographError::InvalidSpec(report)) => assert_eq!(report.errors().count(), 2),
            other => panic!("expected InvalidSpec, got {other:?}"),
        }
    }

    #[test]
    fn test_run_corpus_matches_sequential() {
        let corpus = Corpus {
            categories: vec![
                Category {
                    label: "tech".into(),
                    documents: vec!["Chips and chips.".into(), "New chips ship".into()],
                },
                Category {
                    label: "empty".into(),
                    documents: vec![],
                },
                Category {
                    label: "sport".into(),
                    documents: vec!["The match ended. Fans cheered the match".into()],
                },
            ],
        };
        let pipeline = StandardPipeline::standard();

        let outputs = pipeline.run_corpus(&corpus).unwrap();

        let labels: Vec<&str> = outputs.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["tech", "empty", "sport"]);
        for (out, category) in outputs.iter().zip(&corpus.categories) {
            let seq = pipeline.run_category(category, &mut NoopObserver).unwrap();
            assert_eq!(out.documents, category.len());
            assert_eq!(out.output.graph.sorted_edges(), seq.output.graph.sorted_edges());
            assert_eq!(out.output.view, seq.output.view);
        }
        assert_eq!(outputs[0].output.graph.frequency("chips"), Some(3));
        assert!(outputs[1].output.graph.is_empty());
    }
}
