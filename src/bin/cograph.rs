//! Build one co-occurrence graph per corpus category and print the top-N view.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use rapid_cograph::{
    CategoryOutput, CorpusLoader, GraphView, PipelineSpec, StandardPipeline, TieBreak,
    BBC_NEWS_CATEGORIES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "cograph",
    about = "Sliding-window word co-occurrence graphs per corpus category"
)]
struct Cli {
    /// Corpus root: one subdirectory of .txt files per category
    root: PathBuf,
    /// Category to load (repeatable). Defaults to every subdirectory.
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,
    /// Load the five BBC News categories
    #[arg(long, conflicts_with = "categories")]
    bbc: bool,
    /// Window size in tokens
    #[arg(long, allow_negative_numbers = true)]
    window_size: Option<i64>,
    /// Number of nodes kept for presentation
    #[arg(long, allow_negative_numbers = true)]
    max_nodes: Option<i64>,
    /// Ordering among equally frequent nodes: first_seen | lexicographic
    #[arg(long)]
    tie_break: Option<TieBreak>,
    /// JSON pipeline spec; flags override its graph settings
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Graph flags win over the same settings in `--spec`.
    fn apply_graph_overrides(&self, spec: &mut PipelineSpec) {
        if self.window_size.is_some() {
            spec.graph.window_size = self.window_size;
        }
        if self.max_nodes.is_some() {
            spec.graph.max_nodes = self.max_nodes;
        }
        if self.tie_break.is_some() {
            spec.graph.tie_break = self.tie_break;
        }
    }

    /// `--bbc`, then `--category`, then the spec's list. `None` loads every
    /// subdirectory.
    fn categories_to_load(&self, spec: &PipelineSpec) -> Option<Vec<String>> {
        if self.bbc {
            Some(BBC_NEWS_CATEGORIES.iter().map(|c| c.to_string()).collect())
        } else if !self.categories.is_empty() {
            Some(self.categories.clone())
        } else {
            spec.categories.clone()
        }
    }
}

#[derive(Serialize)]
struct CategoryReport<'a> {
    category: &'a str,
    documents: usize,
    tokens: usize,
    kept_tokens: usize,
    nodes: usize,
    edges: usize,
    view: &'a GraphView,
}

impl<'a> From<&'a CategoryOutput> for CategoryReport<'a> {
    fn from(out: &'a CategoryOutput) -> Self {
        Self {
            category: &out.label,
            documents: out.documents,
            tokens: out.output.token_count,
            kept_tokens: out.output.kept_token_count,
            nodes: out.output.graph.node_count(),
            edges: out.output.graph.edge_count(),
            view: &out.output.view,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut spec = match &cli.spec {
        Some(path) => PipelineSpec::from_json(&std::fs::read_to_string(path)?)?,
        None => PipelineSpec::default(),
    };
    cli.apply_graph_overrides(&mut spec);

    let pipeline = match StandardPipeline::from_spec(&spec) {
        Ok(pipeline) => pipeline,
        Err(rapid_cograph::CographError::InvalidSpec(report)) => {
            for err in report.errors() {
                eprintln!("error: {err}");
            }
            return Err(format!("invalid pipeline spec ({} error(s))", report.errors().count()).into());
        }
        Err(e) => return Err(e.into()),
    };

    let mut loader = CorpusLoader::new(&cli.root);
    if let Some(categories) = cli.categories_to_load(&spec) {
        loader = loader.with_categories(categories);
    }

    let corpus = loader.load()?;
    tracing::info!(
        root = %cli.root.display(),
        categories = corpus.len(),
        documents = corpus.document_count(),
        "corpus loaded"
    );

    let outputs = pipeline.run_corpus(&corpus)?;

    match cli.format {
        OutputFormat::Json => {
            let reports: Vec<CategoryReport<'_>> = outputs.iter().map(CategoryReport::from).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for out in &outputs {
                print_text(&CategoryReport::from(out));
            }
        }
    }
    Ok(())
}

fn print_text(report: &CategoryReport<'_>) {
    println!("== {} ==", report.category);
    println!(
        "documents: {}  tokens: {} (kept {})  graph: {} nodes, {} edges",
        report.documents, report.tokens, report.kept_tokens, report.nodes, report.edges
    );
    if report.view.nodes.is_empty() {
        println!("  (empty graph)");
        println!();
        return;
    }
    println!("top {} words:", report.view.nodes.len());
    for placed in &report.view.nodes {
        println!(
            "  {:>3}. {:<20} {:>7}   ({:+.3}, {:+.3})",
            placed.node.rank, placed.node.token, placed.node.count, placed.position.x, placed.position.y
        );
    }
    println!("edges among top words:");
    for edge in &report.view.edges {
        println!("  {} -- {}  {}", edge.source, edge.target, edge.weight);
    }
    println!();
}
