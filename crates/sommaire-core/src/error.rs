use std::path::PathBuf;

use crate::model::SourceVariant;

#[derive(Debug, thiserror::Error)]
pub enum SommaireError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("{variant} summary page not found in {file}")]
    SummaryPageNotFound { file: String, variant: SourceVariant },

    #[error("could not parse insured person from {variant} summary page in {file}")]
    InsuredNotParsed { file: String, variant: SourceVariant },

    #[error("unknown source variant: {0}. Supported sources: uv, assomption")]
    UnknownSourceVariant(String),

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
