//! Dataset loading, feature selection, and CSV export

use crate::error::PipelineError;
use ndarray::{Array1, Array2};
use std::path::Path;

/// Name of the column appended after clustering.
pub const CLUSTER_COLUMN: &str = "Cluster";

/// An ordered collection of records parsed from an uploaded CSV.
///
/// Cells are kept as strings so textual columns (names, categories) survive
/// the round trip to the exported file untouched; numeric interpretation only
/// happens when a column is selected as a clustering feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse CSV bytes into a dataset.
    ///
    /// The first record is taken as the header row. Malformed input (ragged
    /// rows, invalid encoding) fails with `DatasetParse`; a file with a header
    /// but no data rows fails with `EmptyDataset`.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, PipelineError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        if headers.is_empty() || rows.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        Ok(Dataset { headers, rows })
    }

    /// Read and parse a CSV file from disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::DatasetParse(e.into()))?;
        Self::from_csv_bytes(&bytes)
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// The first `n` data rows, for the preview table.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    fn column_index(&self, name: &str) -> Result<usize, PipelineError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Project the selected columns into a numeric feature matrix.
    ///
    /// Enforces the selection contract up front: at least two columns, every
    /// name present in the header, every cell numeric. A non-numeric cell is a
    /// configuration error reported with its column and 1-based data row; no
    /// coercion or row dropping is attempted.
    pub fn feature_matrix(&self, features: &[String]) -> Result<Array2<f64>, PipelineError> {
        if features.len() < 2 {
            return Err(PipelineError::InsufficientFeatures {
                selected: features.len(),
            });
        }

        let indices = features
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(self.rows.len() * indices.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            for (&col_idx, name) in indices.iter().zip(features) {
                let cell = row.get(col_idx).map(String::as_str).unwrap_or("");
                let parsed: f64 =
                    cell.trim()
                        .parse()
                        .map_err(|_| PipelineError::NonNumericValue {
                            column: name.clone(),
                            row: row_idx + 1,
                            value: cell.to_string(),
                        })?;
                values.push(parsed);
            }
        }

        Ok(Array2::from_shape_vec(
            (self.rows.len(), indices.len()),
            values,
        )?)
    }

    /// Return a copy of the dataset with a trailing integer `Cluster` column.
    ///
    /// `labels` must hold exactly one label per data row; the pipeline
    /// guarantees this by construction.
    pub fn with_cluster_column(&self, labels: &Array1<usize>) -> Self {
        assert_eq!(
            labels.len(),
            self.rows.len(),
            "one cluster label per data row"
        );

        let mut headers = self.headers.clone();
        headers.push(CLUSTER_COLUMN.to_string());

        let rows = self
            .rows
            .iter()
            .zip(labels.iter())
            .map(|(row, &label)| {
                let mut row = row.clone();
                row.push(label.to_string());
                row
            })
            .collect();

        Dataset { headers, rows }
    }

    /// Whether the dataset already carries a `Cluster` column.
    pub fn has_cluster_column(&self) -> bool {
        self.headers.iter().any(|h| h == CLUSTER_COLUMN)
    }

    /// Serialize the dataset back to UTF-8 CSV bytes: header row plus all
    /// records, no index column.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| PipelineError::DatasetParse(e.into_error().into()))
    }
}
