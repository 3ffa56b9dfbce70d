//! Error types shared by every stage of the pipeline.
use thiserror::Error;


/// Errors raised while parsing, building, classifying,
/// attributing, or exporting an oblique decision tree.
/// Every variant aborts the operation in progress.
#[derive(Debug, Error)]
pub enum ObliqueTreeError {
    /// A field of the input text is not a finite number.
    /// `line` and `column` are 1-indexed.
    #[error("parse error at line {line}, column {column}: `{value}` is not a valid number")]
    Parse {
        /// Line of the offending field.
        line: usize,
        /// Column of the offending field.
        column: usize,
        /// The offending field, trimmed.
        value: String,
    },


    /// Inputs of inconsistent length or width.
    #[error("schema error: {0}")]
    Schema(String),


    /// The path strings do not describe a rooted binary tree.
    #[error("structural error: {0}")]
    Structural(String),


    /// A normalization over a vector that sums to zero.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),


    /// I/O error while reading input files or writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),


    /// Failure while converting a `polars::DataFrame`.
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),


    /// Failure while (de)serializing JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}


/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ObliqueTreeError>;
