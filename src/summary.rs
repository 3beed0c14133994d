//! Per-cluster summaries backing the pie chart and the mean-attribute table

use ndarray::{Array1, Array2};

/// Read-only aggregate for one cluster id.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    /// Cluster id, 0-indexed
    pub cluster: usize,
    /// Number of rows assigned to this cluster
    pub count: usize,
    /// Share of all rows, in percent
    pub share: f64,
    /// Mean of each selected feature, rounded to 2 decimal places,
    /// in selection order
    pub means: Vec<f64>,
}

/// Summarize cluster assignments over the feature matrix.
///
/// Returns one entry per cluster id actually present, sorted ascending.
/// Means are arithmetic means of the cluster's members rounded to 2 decimals;
/// shares are percentages of the total row count.
pub fn summarize(features: &Array2<f64>, labels: &Array1<usize>) -> Vec<ClusterSummary> {
    let n_rows = features.nrows();
    if n_rows == 0 {
        return Vec::new();
    }

    let n_features = features.ncols();
    let max_label = labels.iter().copied().max().unwrap_or(0);

    let mut counts = vec![0usize; max_label + 1];
    let mut sums = vec![vec![0.0f64; n_features]; max_label + 1];

    for (i, &label) in labels.iter().enumerate() {
        counts[label] += 1;
        for (j, sum) in sums[label].iter_mut().enumerate() {
            *sum += features[[i, j]];
        }
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(cluster, &count)| {
            let means = sums[cluster]
                .iter()
                .map(|sum| round2(sum / count as f64))
                .collect();
            ClusterSummary {
                cluster,
                count,
                share: count as f64 / n_rows as f64 * 100.0,
                means,
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
