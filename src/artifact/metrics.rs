//! Scalar metrics artifact

use serde_json::Value;

use super::{Artifact, ArtifactKind};

/// An artifact for storing key-value scalar metrics.
///
/// Each metric is stored directly in the artifact metadata.
///
/// ```rust
/// use pipeline_artifacts::artifact::{ArtifactType, Metrics};
/// use serde_json::Value;
///
/// let mut metrics = Metrics::default();
/// metrics.log_metric("accuracy", 0.93);
/// metrics.log_metric("accuracy", 0.95);
///
/// assert_eq!(metrics.metric("accuracy"), Some(&Value::from(0.95)));
/// assert_eq!(metrics.metadata().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    base: Artifact,
}

impl Metrics {
    /// Set a scalar metric, overwriting any previous value for `key`.
    pub fn log_metric(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.base.metadata.insert(key.into(), value.into());
    }

    /// Get a logged metric.
    #[must_use]
    pub fn metric(&self, key: &str) -> Option<&Value> {
        self.base.metadata.get(key)
    }
}

impl From<Artifact> for Metrics {
    fn from(base: Artifact) -> Self {
        Self { base }
    }
}

artifact_type!(Metrics, ArtifactKind::Metrics);
