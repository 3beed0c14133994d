//! Segwise: a Rust CLI application for customer segmentation using K-Means clustering
//!
//! The whole program is one idempotent pipeline over an uploaded CSV: parse the
//! file, project the user-selected numeric columns into a feature matrix, fit a
//! seeded K-Means model, annotate every record with its cluster id, then render
//! charts and export the labeled dataset back to CSV.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod summary;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{Dataset, CLUSTER_COLUMN};
pub use error::PipelineError;
pub use model::{fit_kmeans, KMeansModel};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineOutput};
pub use summary::{summarize, ClusterSummary};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
