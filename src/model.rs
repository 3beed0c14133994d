//! K-Means clustering over the selected feature matrix

use crate::error::PipelineError;
use linfa::prelude::*;
use linfa_clustering::{KMeans, KMeansInit};
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Supported cluster count range.
pub const MIN_CLUSTERS: usize = 2;
pub const MAX_CLUSTERS: usize = 10;

/// Number of independent k-means++ seedings; the lowest-inertia run wins.
const N_RUNS: usize = 10;

/// Fitted K-Means model with per-row assignments
#[derive(Debug)]
pub struct KMeansModel {
    /// Fitted K-Means model from linfa
    pub model: KMeans<f64, L2Dist>,
    /// Number of clusters requested
    pub n_clusters: usize,
    /// Cluster assignments for the training rows, in [0, n_clusters)
    pub labels: Array1<usize>,
    /// Cluster centroids in feature space
    pub centroids: Array2<f64>,
    /// Within-cluster sum of squares for the winning run
    pub inertia: f64,
}

impl KMeansModel {
    /// Number of rows assigned to each cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for &label in self.labels.iter() {
            if label < self.n_clusters {
                sizes[label] += 1;
            }
        }
        sizes
    }

    /// Cluster ids that actually received at least one row, ascending.
    ///
    /// Normally all of [0, k); a cluster can come back empty only on
    /// degenerate inputs, and then it simply has no slice or summary row.
    pub fn present_clusters(&self) -> Vec<usize> {
        self.cluster_sizes()
            .iter()
            .enumerate()
            .filter(|(_, &size)| size > 0)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Fit a K-Means model on the feature matrix.
///
/// Runs standard Lloyd iteration from `N_RUNS` k-means++ seedings and keeps
/// the lowest-inertia result. The rng is seeded from `seed`, so identical
/// inputs produce identical labels.
///
/// # Arguments
/// * `features` - numeric matrix, one row per record, >= 2 columns
/// * `n_clusters` - requested k, in [2, 10]
/// * `seed` - rng seed for the k-means++ seedings
/// * `max_iters` - iteration cap per run
/// * `tolerance` - centroid movement threshold for convergence
pub fn fit_kmeans(
    features: &Array2<f64>,
    n_clusters: usize,
    seed: u64,
    max_iters: usize,
    tolerance: f64,
) -> Result<KMeansModel, PipelineError> {
    if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&n_clusters) {
        return Err(PipelineError::InvalidClusterCount { k: n_clusters });
    }

    let n_samples = features.nrows();
    if n_samples < n_clusters {
        return Err(PipelineError::TooFewRows {
            rows: n_samples,
            k: n_clusters,
        });
    }

    let rng = Xoshiro256Plus::seed_from_u64(seed);
    let dataset = Dataset::new(features.clone(), Array1::<usize>::zeros(n_samples));

    let model = KMeans::params_with(n_clusters, rng, L2Dist)
        .init_method(KMeansInit::KMeansPlusPlus)
        .n_runs(N_RUNS)
        .max_n_iterations(max_iters as u64)
        .tolerance(tolerance)
        .fit(&dataset)
        .map_err(|e| PipelineError::Clustering(e.to_string()))?;

    let labels = model.predict(&dataset);
    let centroids = model.centroids().clone();
    let inertia = compute_inertia(features, &labels, &centroids);

    Ok(KMeansModel {
        model,
        n_clusters,
        labels,
        centroids,
        inertia,
    })
}

/// Within-cluster sum of squares over all rows.
fn compute_inertia(features: &Array2<f64>, labels: &Array1<usize>, centroids: &Array2<f64>) -> f64 {
    let mut inertia = 0.0;

    for (i, &cluster) in labels.iter().enumerate() {
        if cluster < centroids.nrows() {
            let point = features.row(i);
            let centroid = centroids.row(cluster);
            let distance_sq = point
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>();
            inertia += distance_sq;
        }
    }

    inertia
}
