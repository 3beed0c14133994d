//! Error types for the segmentation pipeline

use thiserror::Error;

/// Everything that can go wrong between raw CSV bytes and a labeled dataset.
///
/// Parse and validation failures halt the pipeline before clustering; the
/// remaining variants surface clustering failures as-is, with no fallback.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The uploaded bytes could not be parsed as delimited tabular data
    #[error("failed to parse dataset: {0}")]
    DatasetParse(#[from] csv::Error),

    /// The file parsed but contains no data rows
    #[error("dataset contains no data rows")]
    EmptyDataset,

    /// Fewer than two features were selected for clustering
    #[error("at least 2 features are required for clustering, got {selected}")]
    InsufficientFeatures { selected: usize },

    /// A selected feature name does not appear in the CSV header
    #[error("selected column '{name}' not found in dataset header")]
    UnknownColumn { name: String },

    /// A selected feature column holds a value that does not parse as a number
    #[error("non-numeric value '{value}' in column '{column}' at data row {row}")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    /// Requested cluster count is outside the supported [2, 10] range
    #[error("cluster count must be between 2 and 10, got {k}")]
    InvalidClusterCount { k: usize },

    /// More clusters requested than there are data rows
    #[error("number of data rows ({rows}) must be at least the cluster count ({k})")]
    TooFewRows { rows: usize, k: usize },

    /// The underlying k-means routine failed (e.g. degenerate input)
    #[error("k-means clustering failed: {0}")]
    Clustering(String),

    /// Feature matrix construction failed
    #[error("failed to build feature matrix: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
