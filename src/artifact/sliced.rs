//! Sliced classification metrics artifact
//!
//! Holds one [`ClassificationMetrics`] per data slice. Slices are created on
//! first use and never replaced. After every mutation the metadata is
//! replaced by an `evaluationSlices` list rebuilt in slice creation order:
//!
//! ```text
//! evaluationSlices: [ {slice: <label>, sliceClassificationMetrics: <metadata>}, ... ]
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Artifact, ArtifactKind, ArtifactType, ClassificationMetrics, Metadata};
use crate::Result;

const EVALUATION_SLICES_KEY: &str = "evaluationSlices";

/// Published slice entry, read back when rehydrating.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SliceEntry {
    slice: String,
    slice_classification_metrics: Metadata,
}

/// An artifact for storing classification metrics per data slice.
///
/// Every logging method takes the slice label first and otherwise behaves
/// like the matching [`ClassificationMetrics`] method.
///
/// ```rust
/// use pipeline_artifacts::artifact::{ArtifactType, SlicedClassificationMetrics};
///
/// let mut metrics = SlicedClassificationMetrics::default();
/// metrics.log_roc_reading("age<30", 0.5, 0.8, 0.1);
/// metrics.load_confusion_matrix("age>=30", ["yes", "no"], &[[7, 3], [2, 8]])?;
///
/// let slices = metrics.metadata()["evaluationSlices"].as_array().unwrap();
/// assert_eq!(slices.len(), 2);
/// assert_eq!(slices[0]["slice"], "age<30");
/// # Ok::<(), pipeline_artifacts::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlicedClassificationMetrics {
    base: Artifact,
    slices: IndexMap<String, ClassificationMetrics>,
}

impl SlicedClassificationMetrics {
    /// Metrics of one slice.
    #[must_use]
    pub fn slice(&self, slice: &str) -> Option<&ClassificationMetrics> {
        self.slices.get(slice)
    }

    /// All slices, in creation order.
    pub fn slices(&self) -> impl Iterator<Item = (&str, &ClassificationMetrics)> {
        self.slices.iter().map(|(label, metrics)| (label.as_str(), metrics))
    }

    /// Log a single ROC curve point for `slice`.
    pub fn log_roc_reading(&mut self, slice: &str, threshold: f64, tpr: f64, fpr: f64) {
        self.upsert(slice).log_roc_data_point(fpr, tpr, threshold);
        self.update_metadata();
    }

    /// Bulk load ROC readings for `slice`, each as `[threshold, tpr, fpr]`.
    pub fn load_roc_readings(&mut self, slice: &str, readings: &[[f64; 3]]) {
        let metrics = self.upsert(slice);
        for &[threshold, tpr, fpr] in readings {
            metrics.log_roc_data_point(fpr, tpr, threshold);
        }
        self.update_metadata();
    }

    /// Reset the confusion matrix categories of `slice`.
    pub fn set_confusion_matrix_categories<I, S>(&mut self, slice: &str, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upsert(slice).set_confusion_matrix_categories(categories);
        self.update_metadata();
    }

    /// Replace a confusion matrix row of `slice`.
    ///
    /// # Errors
    ///
    /// Same as [`ClassificationMetrics::log_confusion_matrix_row`].
    pub fn log_confusion_matrix_row(
        &mut self,
        slice: &str,
        row_category: &str,
        row: &[i64],
    ) -> Result<()> {
        let result = self.upsert(slice).log_confusion_matrix_row(row_category, row);
        self.update_metadata();
        result
    }

    /// Set a confusion matrix cell of `slice`.
    ///
    /// # Errors
    ///
    /// Same as [`ClassificationMetrics::log_confusion_matrix_cell`].
    pub fn log_confusion_matrix_cell(
        &mut self,
        slice: &str,
        row_category: &str,
        col_category: &str,
        value: i64,
    ) -> Result<()> {
        let result = self
            .upsert(slice)
            .log_confusion_matrix_cell(row_category, col_category, value);
        self.update_metadata();
        result
    }

    /// Bulk load the whole confusion matrix of `slice`.
    ///
    /// # Errors
    ///
    /// Same as [`ClassificationMetrics::log_confusion_matrix`].
    pub fn load_confusion_matrix<I, S, R>(
        &mut self,
        slice: &str,
        categories: I,
        matrix: &[R],
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        R: AsRef<[i64]>,
    {
        let result = self.upsert(slice).log_confusion_matrix(categories, matrix);
        self.update_metadata();
        result
    }

    fn upsert(&mut self, slice: &str) -> &mut ClassificationMetrics {
        self.slices.entry(slice.to_string()).or_default()
    }

    fn update_metadata(&mut self) {
        let entries: Vec<Value> = self
            .slices
            .iter()
            .map(|(label, metrics)| {
                json!({
                    "slice": label,
                    "sliceClassificationMetrics": metrics.metadata(),
                })
            })
            .collect();
        self.base.metadata.clear();
        self.base
            .metadata
            .insert(EVALUATION_SLICES_KEY.to_string(), Value::Array(entries));
    }
}

impl From<Artifact> for SlicedClassificationMetrics {
    /// Rebuild the slice mapping from well-formed `evaluationSlices` metadata.
    fn from(base: Artifact) -> Self {
        let slices = base
            .metadata
            .get(EVALUATION_SLICES_KEY)
            .and_then(slices_from_value)
            .unwrap_or_default();
        Self { base, slices }
    }
}

artifact_type!(SlicedClassificationMetrics, ArtifactKind::SlicedClassificationMetrics);

fn slices_from_value(value: &Value) -> Option<IndexMap<String, ClassificationMetrics>> {
    match Vec::<SliceEntry>::deserialize(value) {
        Ok(entries) => Some(
            entries
                .into_iter()
                .map(|entry| {
                    let metrics: ClassificationMetrics = Artifact::builder()
                        .metadata(entry.slice_classification_metrics)
                        .build_as();
                    (entry.slice, metrics)
                })
                .collect(),
        ),
        Err(err) => {
            tracing::debug!(%err, "ignoring malformed {EVALUATION_SLICES_KEY} metadata");
            None
        }
    }
}
