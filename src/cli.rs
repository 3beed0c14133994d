//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Customer segmentation CLI: K-Means clustering over selected CSV columns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file (header row required)
    #[arg(short, long)]
    pub input: String,

    /// Comma-separated list of numeric columns to cluster on (at least 2)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = vec![
            "Annual Income (k$)".to_string(),
            "Spending Score (1-100)".to_string(),
        ]
    )]
    pub features: Vec<String>,

    /// Number of clusters for K-Means (2-10)
    #[arg(short = 'k', long, default_value = "5")]
    pub clusters: usize,

    /// Output path for the cluster chart (scatter or pairwise grid);
    /// the pie chart lands next to it with a `_pie` suffix
    #[arg(short, long, default_value = "cluster_plot.png")]
    pub output: String,

    /// Output path for the annotated CSV export
    #[arg(short, long, default_value = "phan_cum_khach_hang.csv")]
    pub export: String,

    /// Random seed for the k-means++ seedings
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Maximum iterations for K-Means algorithm
    #[arg(long, default_value = "300")]
    pub max_iters: usize,

    /// Tolerance for K-Means convergence
    #[arg(long, default_value = "1e-4")]
    pub tolerance: f64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Bundle the clustering knobs into the pipeline config.
    pub fn pipeline_config(&self) -> crate::pipeline::PipelineConfig {
        crate::pipeline::PipelineConfig {
            features: self.features.clone(),
            clusters: self.clusters,
            seed: self.seed,
            max_iters: self.max_iters,
            tolerance: self.tolerance,
        }
    }
}
