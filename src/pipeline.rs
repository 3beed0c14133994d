//! The end-to-end segmentation pipeline as one pure function

use crate::data::Dataset;
use crate::error::PipelineError;
use crate::model::{fit_kmeans, KMeansModel};
use crate::summary::{summarize, ClusterSummary};
use ndarray::Array2;

/// Everything a single run depends on besides the file bytes.
///
/// One value of this struct fully determines one run: re-invoking with the
/// same bytes and config reproduces the same output, so there is no hidden
/// incremental state anywhere.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Names of the columns to cluster on, at least 2
    pub features: Vec<String>,
    /// Requested cluster count, in [2, 10]
    pub clusters: usize,
    /// Rng seed for the k-means++ seedings
    pub seed: u64,
    /// Iteration cap per k-means run
    pub max_iters: usize,
    /// Convergence tolerance
    pub tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            features: vec![
                "Annual Income (k$)".to_string(),
                "Spending Score (1-100)".to_string(),
            ],
            clusters: 5,
            seed: 42,
            max_iters: 300,
            tolerance: 1e-4,
        }
    }
}

/// Result of one full pipeline run.
#[derive(Debug)]
pub struct PipelineOutput {
    /// The parsed dataset with the trailing `Cluster` column
    pub dataset: Dataset,
    /// The numeric matrix that was clustered, in selection order
    pub matrix: Array2<f64>,
    /// The fitted model with labels, centroids, and inertia
    pub model: KMeansModel,
    /// Per-cluster counts, shares, and feature means, ascending by id
    pub summaries: Vec<ClusterSummary>,
}

/// Run the whole pipeline over raw CSV bytes: parse, select features,
/// cluster, annotate, summarize.
///
/// Strictly sequential with no partial output: the first failing stage
/// returns its error and nothing downstream runs.
pub fn run_pipeline(bytes: &[u8], config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let dataset = Dataset::from_csv_bytes(bytes)?;
    let matrix = dataset.feature_matrix(&config.features)?;
    let model = fit_kmeans(
        &matrix,
        config.clusters,
        config.seed,
        config.max_iters,
        config.tolerance,
    )?;

    let dataset = dataset.with_cluster_column(&model.labels);
    let summaries = summarize(&matrix, &model.labels);

    Ok(PipelineOutput {
        dataset,
        matrix,
        model,
        summaries,
    })
}
