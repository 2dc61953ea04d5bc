//! Classification metrics artifact - ROC curve and confusion matrix
//!
//! ## Metadata Layout
//!
//! ```text
//! confidenceMetrics: [ {confidenceThreshold, recall, falsePositiveRate}, ... ]
//! confusionMatrix:   { annotationSpecs: [ {displayName}, ... ],
//!                      rows:            [ {row: [count, ...]}, ... ] }
//! ```
//!
//! The confusion matrix is kept as typed state (`categories` + `matrix`) and
//! republished into the metadata after every mutation. ROC readings live only
//! in the metadata.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Artifact, ArtifactKind};
use crate::{Error, Result};

const CONFUSION_MATRIX_KEY: &str = "confusionMatrix";
const CONFIDENCE_METRICS_KEY: &str = "confidenceMetrics";

/// A single point on an ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RocReading {
    /// Decision threshold of the point.
    pub confidence_threshold: f64,
    /// True positive rate at the threshold.
    pub recall: f64,
    /// False positive rate at the threshold.
    pub false_positive_rate: f64,
}

impl From<RocReading> for Value {
    fn from(reading: RocReading) -> Self {
        json!({
            "confidenceThreshold": reading.confidence_threshold,
            "recall": reading.recall,
            "falsePositiveRate": reading.false_positive_rate,
        })
    }
}

/// Published confusion matrix shape, read back when rehydrating.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfusionMatrixDoc {
    annotation_specs: Vec<AnnotationSpec>,
    rows: Vec<MatrixRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationSpec {
    display_name: String,
}

#[derive(Deserialize)]
struct MatrixRow {
    row: Vec<i64>,
}

/// An artifact for storing classification metrics.
///
/// Categories must be set before rows or cells of the confusion matrix can
/// be logged.
///
/// ```rust
/// use pipeline_artifacts::artifact::{ArtifactType, ClassificationMetrics};
///
/// let mut metrics = ClassificationMetrics::default();
/// metrics.set_confusion_matrix_categories(["cat", "dog"]);
/// metrics.log_confusion_matrix_row("cat", &[9, 1])?;
/// metrics.log_confusion_matrix_cell("dog", "dog", 8)?;
///
/// assert_eq!(metrics.matrix(), [vec![9, 1], vec![0, 8]]);
/// assert_eq!(metrics.metadata()["confusionMatrix"]["rows"][1]["row"][1], 8);
/// # Ok::<(), pipeline_artifacts::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationMetrics {
    base: Artifact,
    categories: Vec<String>,
    matrix: Vec<Vec<i64>>,
}

impl ClassificationMetrics {
    /// Confusion matrix categories, in row/column order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Confusion matrix rows.
    #[must_use]
    pub fn matrix(&self) -> &[Vec<i64>] {
        &self.matrix
    }

    /// ROC readings logged so far, in logging order.
    ///
    /// Entries that do not have the reading shape are skipped.
    #[must_use]
    pub fn roc_readings(&self) -> Vec<RocReading> {
        self.base
            .metadata
            .get(CONFIDENCE_METRICS_KEY)
            .and_then(Value::as_array)
            .map(|readings| {
                readings
                    .iter()
                    .filter_map(|r| RocReading::deserialize(r).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append a single ROC curve point to the metadata.
    pub fn log_roc_data_point(&mut self, fpr: f64, tpr: f64, threshold: f64) {
        let reading = Value::from(RocReading {
            confidence_threshold: threshold,
            recall: tpr,
            false_positive_rate: fpr,
        });

        let readings = self
            .base
            .metadata
            .entry(CONFIDENCE_METRICS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        match readings {
            Value::Array(list) => list.push(reading),
            other => {
                tracing::warn!(
                    found = %other,
                    "replacing non-list {CONFIDENCE_METRICS_KEY} metadata with a fresh ROC curve"
                );
                *other = Value::Array(vec![reading]);
            }
        }
    }

    /// Append a whole ROC curve, one point per index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `fpr`, `tpr` and `threshold` differ
    /// in length. Nothing is logged in that case.
    pub fn log_roc_curve(&mut self, fpr: &[f64], tpr: &[f64], threshold: &[f64]) -> Result<()> {
        if fpr.len() != tpr.len() || fpr.len() != threshold.len() {
            return Err(Error::InvalidInput(format!(
                "Length of fpr, tpr and threshold must be the same. \
                 Got lengths {}, {} and {} respectively.",
                fpr.len(),
                tpr.len(),
                threshold.len()
            )));
        }

        for ((&fpr, &tpr), &threshold) in fpr.iter().zip(tpr).zip(threshold) {
            self.log_roc_data_point(fpr, tpr, threshold);
        }
        Ok(())
    }

    /// Reset the confusion matrix to `categories` with all cells zero.
    pub fn set_confusion_matrix_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        let size = self.categories.len();
        self.matrix = vec![vec![0; size]; size];
        self.publish_confusion_matrix();
    }

    /// Replace the row for `row_category`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the category is unknown or the row
    /// length differs from the number of categories. The matrix is unchanged.
    pub fn log_confusion_matrix_row(&mut self, row_category: &str, row: &[i64]) -> Result<()> {
        let index = self.category_index(row_category)?;
        if row.len() != self.categories.len() {
            return Err(Error::InvalidInput(format!(
                "Invalid row. Expected size: {} got: {}",
                self.categories.len(),
                row.len()
            )));
        }

        self.matrix[index] = row.to_vec();
        self.publish_confusion_matrix();
        Ok(())
    }

    /// Set a single cell of the confusion matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if either category is unknown.
    pub fn log_confusion_matrix_cell(
        &mut self,
        row_category: &str,
        col_category: &str,
        value: i64,
    ) -> Result<()> {
        let row = self.category_index(row_category)?;
        let col = self.category_index(col_category)?;

        self.matrix[row][col] = value;
        self.publish_confusion_matrix();
        Ok(())
    }

    /// Replace the whole confusion matrix.
    ///
    /// Categories are reset first; the matrix shape is then checked in full
    /// before any row is applied. Each row is stored under its category, the
    /// same as logging the rows one at a time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the matrix is not square with one
    /// row and one column per category. The categories stay reset with an
    /// all-zero matrix in that case.
    pub fn log_confusion_matrix<I, S, R>(&mut self, categories: I, matrix: &[R]) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: AsRef<[i64]>,
    {
        self.set_confusion_matrix_categories(categories);

        let size = self.categories.len();
        if matrix.len() != size || matrix.iter().any(|row| row.as_ref().len() != size) {
            let rows: Vec<&[i64]> = matrix.iter().map(AsRef::as_ref).collect();
            return Err(Error::InvalidInput(format!(
                "Invalid matrix: {rows:?} passed for categories: {:?}",
                self.categories
            )));
        }

        for (position, row) in matrix.iter().enumerate() {
            let index = self.category_index(&self.categories[position])?;
            self.matrix[index] = row.as_ref().to_vec();
        }
        self.publish_confusion_matrix();
        Ok(())
    }

    fn category_index(&self, category: &str) -> Result<usize> {
        self.categories
            .iter()
            .position(|c| c == category)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Invalid category: {category} passed. Expected one of: {:?}",
                    self.categories
                ))
            })
    }

    fn publish_confusion_matrix(&mut self) {
        let annotation_specs: Vec<Value> = self
            .categories
            .iter()
            .map(|category| json!({ "displayName": category }))
            .collect();
        let rows: Vec<Value> = self.matrix.iter().map(|row| json!({ "row": row })).collect();

        self.base.metadata.insert(
            CONFUSION_MATRIX_KEY.to_string(),
            json!({ "annotationSpecs": annotation_specs, "rows": rows }),
        );
    }
}

impl From<Artifact> for ClassificationMetrics {
    /// Adopt a well-formed published confusion matrix as the typed state.
    fn from(base: Artifact) -> Self {
        let (categories, matrix) = base
            .metadata
            .get(CONFUSION_MATRIX_KEY)
            .and_then(confusion_matrix_from_value)
            .unwrap_or_default();
        Self {
            base,
            categories,
            matrix,
        }
    }
}

artifact_type!(ClassificationMetrics, ArtifactKind::ClassificationMetrics);

fn confusion_matrix_from_value(value: &Value) -> Option<(Vec<String>, Vec<Vec<i64>>)> {
    let doc = match ConfusionMatrixDoc::deserialize(value) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed {CONFUSION_MATRIX_KEY} metadata");
            return None;
        }
    };

    let size = doc.annotation_specs.len();
    if doc.rows.len() != size || doc.rows.iter().any(|r| r.row.len() != size) {
        tracing::debug!(size, "ignoring non-square {CONFUSION_MATRIX_KEY} metadata");
        return None;
    }

    Some((
        doc.annotation_specs
            .into_iter()
            .map(|spec| spec.display_name)
            .collect(),
        doc.rows.into_iter().map(|r| r.row).collect(),
    ))
}
