use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::validation::ValidationReport;

/// Error type for configuration, corpus loading, and driver failures.
///
/// Text processing itself never fails: empty or degenerate input yields an
/// empty graph rather than an error.
#[derive(Debug, Error)]
pub enum CographError {
    #[error("invalid configuration: {field} = {value}: {reason}")]
    InvalidConfig {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
    #[error("pipeline spec rejected with {} error(s)", .0.errors().count())]
    InvalidSpec(ValidationReport),
    #[error("category '{category}' not found at {}", path.display())]
    MissingCategory { category: String, path: PathBuf },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CographError>;
