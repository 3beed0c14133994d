//! Integration tests for Segwise

use approx::assert_abs_diff_eq;
use segwise::{run_pipeline, Dataset, PipelineConfig, PipelineError, CLUSTER_COLUMN};
use std::fmt::Write as _;
use std::io::Write;
use tempfile::NamedTempFile;

/// Build a mall-customers style CSV with three clear income/spending groups.
fn customers_csv(rows_per_group: usize) -> String {
    let mut csv = String::from("CustomerID,Genre,Age,Annual Income (k$),Spending Score (1-100)\n");
    let mut id = 1;

    // (income base, spending base) per group; small deterministic jitter so
    // points inside a group do not collapse onto each other
    for (income, spending) in [(20, 80), (55, 50), (95, 15)] {
        for i in 0..rows_per_group {
            let genre = if i % 2 == 0 { "Male" } else { "Female" };
            writeln!(
                csv,
                "{},{},{},{},{}",
                id,
                genre,
                20 + (i % 30),
                income + (i % 5) as i32,
                spending + (i % 7) as i32,
            )
            .unwrap();
            id += 1;
        }
    }
    csv
}

fn default_config(clusters: usize) -> PipelineConfig {
    PipelineConfig {
        clusters,
        ..PipelineConfig::default()
    }
}

#[test]
fn test_end_to_end_pipeline() {
    let csv = customers_csv(20);
    let output = run_pipeline(csv.as_bytes(), &default_config(3)).unwrap();

    // One label per record, all inside [0, k)
    assert_eq!(output.dataset.n_rows(), 60);
    assert_eq!(output.model.labels.len(), 60);
    assert!(output.model.labels.iter().all(|&label| label < 3));

    // Annotated dataset carries the trailing Cluster column
    assert!(output.dataset.has_cluster_column());
    assert_eq!(output.dataset.headers().last().unwrap(), CLUSTER_COLUMN);
    assert_eq!(output.dataset.headers().len(), 6);

    // Cluster sizes account for every record
    let total: usize = output.model.cluster_sizes().iter().sum();
    assert_eq!(total, 60);
}

#[test]
fn test_well_separated_groups_recovered() {
    let csv = customers_csv(20);
    let output = run_pipeline(csv.as_bytes(), &default_config(3)).unwrap();
    let labels = &output.model.labels;

    // Rows were generated group-by-group, so each third shares a label and
    // the thirds differ from each other
    for group in 0..3 {
        let first = labels[group * 20];
        for i in 0..20 {
            assert_eq!(labels[group * 20 + i], first);
        }
    }
    assert_ne!(labels[0], labels[20]);
    assert_ne!(labels[20], labels[40]);
}

#[test]
fn test_determinism_across_runs() {
    let csv = customers_csv(15);
    let config = default_config(5);

    let first = run_pipeline(csv.as_bytes(), &config).unwrap();
    let second = run_pipeline(csv.as_bytes(), &config).unwrap();

    assert_eq!(first.model.labels, second.model.labels);
    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.summaries, second.summaries);
}

#[test]
fn test_export_round_trip() {
    let csv = customers_csv(10);
    let output = run_pipeline(csv.as_bytes(), &default_config(3)).unwrap();

    let exported = output.dataset.to_csv_bytes().unwrap();
    let reparsed = Dataset::from_csv_bytes(&exported).unwrap();

    assert_eq!(reparsed, output.dataset);
    assert!(reparsed.headers().contains(&CLUSTER_COLUMN.to_string()));

    // Every exported Cluster value is a valid label
    let cluster_idx = reparsed.headers().len() - 1;
    for row in reparsed.rows() {
        let label: usize = row[cluster_idx].parse().unwrap();
        assert!(label < 3);
    }
}

#[test]
fn test_export_file_written_to_disk() {
    let csv = customers_csv(10);
    let output = run_pipeline(csv.as_bytes(), &default_config(2)).unwrap();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&output.dataset.to_csv_bytes().unwrap())
        .unwrap();

    let reparsed = Dataset::from_csv_path(file.path()).unwrap();
    assert_eq!(reparsed, output.dataset);
}

#[test]
fn test_insufficient_features_never_reaches_clustering() {
    let csv = customers_csv(10);
    let config = PipelineConfig {
        features: vec!["Age".to_string()],
        ..default_config(3)
    };

    let err = run_pipeline(csv.as_bytes(), &config).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InsufficientFeatures { selected: 1 }
    ));
}

#[test]
fn test_unparsable_upload_halts() {
    let err = run_pipeline(b"a,b,c\n1,2\n", &default_config(3)).unwrap_err();
    assert!(matches!(err, PipelineError::DatasetParse(_)));

    let err = run_pipeline(b"", &default_config(3)).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyDataset));
}

#[test]
fn test_non_numeric_feature_rejected() {
    let csv = customers_csv(10);
    let config = PipelineConfig {
        features: vec!["Genre".to_string(), "Age".to_string()],
        ..default_config(3)
    };

    let err = run_pipeline(csv.as_bytes(), &config).unwrap_err();
    assert!(matches!(err, PipelineError::NonNumericValue { .. }));
}

#[test]
fn test_summary_means_match_members() {
    let csv = customers_csv(20);
    let output = run_pipeline(csv.as_bytes(), &default_config(3)).unwrap();

    assert_eq!(output.summaries.len(), 3);

    // Recompute each cluster's means by hand from the matrix and labels
    for summary in &output.summaries {
        let members: Vec<usize> = output
            .model
            .labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == summary.cluster)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(members.len(), summary.count);

        for (j, &mean) in summary.means.iter().enumerate() {
            let expected: f64 = members
                .iter()
                .map(|&i| output.matrix[[i, j]])
                .sum::<f64>()
                / members.len() as f64;
            let expected = (expected * 100.0).round() / 100.0;
            assert_abs_diff_eq!(mean, expected, epsilon = 1e-9);
        }
    }

    // Shares behave like pie slices: all present ids, summing to 100%
    let ids: Vec<usize> = output.summaries.iter().map(|s| s.cluster).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    let share_total: f64 = output.summaries.iter().map(|s| s.share).sum();
    assert_abs_diff_eq!(share_total, 100.0, epsilon = 1e-9);
}

#[test]
fn test_three_feature_selection() {
    let csv = customers_csv(15);
    let config = PipelineConfig {
        features: vec![
            "Age".to_string(),
            "Annual Income (k$)".to_string(),
            "Spending Score (1-100)".to_string(),
        ],
        ..default_config(4)
    };

    let output = run_pipeline(csv.as_bytes(), &config).unwrap();
    assert_eq!(output.matrix.shape(), &[45, 3]);
    assert!(output.model.labels.iter().all(|&label| label < 4));
    for summary in &output.summaries {
        assert_eq!(summary.means.len(), 3);
    }
}

#[test]
fn test_invalid_cluster_counts() {
    let csv = customers_csv(10);

    let err = run_pipeline(csv.as_bytes(), &default_config(1)).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidClusterCount { k: 1 }));

    let err = run_pipeline(csv.as_bytes(), &default_config(11)).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidClusterCount { k: 11 }));
}
