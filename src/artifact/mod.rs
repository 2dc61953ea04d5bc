//! Artifact metadata model
//!
//! Every pipeline artifact is a named, located, metadata-bearing record. The
//! shared [`Artifact`] record holds the data; typed variants wrap it and add a
//! schema title plus kind-specific helpers.
//!
//! ## Variants
//!
//! ```text
//! ArtifactKind                   schema title                          type
//! ─────────────────────────────  ────────────────────────────────────  ───────────────────────────
//! Artifact                       system.Artifact                       Artifact
//! Model                          system.Model                          Model
//! Dataset                        system.Dataset                        Dataset
//! Metrics                        system.Metrics                        Metrics
//! ClassificationMetrics          system.ClassificationMetrics          ClassificationMetrics
//! SlicedClassificationMetrics    system.SlicedClassificationMetrics    SlicedClassificationMetrics
//! Html                           system.HTML                           Html
//! Markdown                       system.Markdown                       Markdown
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pipeline_artifacts::artifact::{Artifact, ArtifactType, Model};
//!
//! let mut model: Model = Artifact::builder()
//!     .name("classifier")
//!     .uri("gs://bucket/models/classifier")
//!     .build_as();
//! model.set_framework("pytorch");
//!
//! assert_eq!(model.schema_title(), "system.Model");
//! assert_eq!(model.path(), "/gcs/bucket/models/classifier");
//!
//! model.set_path("/s3/other/classifier");
//! assert_eq!(model.uri(), "s3://other/classifier");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::uri::{local_path_for_uri, remote_uri_for_path};
use crate::Error;

/// Implements [`ArtifactType`] for a variant that wraps its record in `base`.
macro_rules! artifact_type {
    ($ty:ty, $kind:expr) => {
        impl $crate::artifact::ArtifactType for $ty {
            const KIND: $crate::artifact::ArtifactKind = $kind;

            fn base(&self) -> &$crate::artifact::Artifact {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::artifact::Artifact {
                &mut self.base
            }

            fn into_base(self) -> $crate::artifact::Artifact {
                self.base
            }
        }
    };
}

mod classification;
mod media;
mod metrics;
mod model;
mod record;
mod sliced;

pub use classification::{ClassificationMetrics, RocReading};
pub use media::{Dataset, Html, Markdown};
pub use metrics::Metrics;
pub use model::Model;
pub use record::ArtifactRecord;
pub use sliced::SlicedClassificationMetrics;

/// Free-form artifact metadata (insertion ordered).
pub type Metadata = serde_json::Map<String, Value>;

/// Schema version shared by every artifact kind.
pub const SCHEMA_VERSION: &str = "0.0.1";

/// Artifact kinds known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Generic artifact
    Artifact,
    /// Trained model
    Model,
    /// Dataset
    Dataset,
    /// Scalar metrics
    Metrics,
    /// ROC curve and confusion matrix
    ClassificationMetrics,
    /// Classification metrics per data slice
    SlicedClassificationMetrics,
    /// HTML document
    Html,
    /// Markdown document
    Markdown,
}

impl ArtifactKind {
    /// Registry lookup table, one entry per kind.
    pub const ALL: [Self; 8] = [
        Self::Artifact,
        Self::Model,
        Self::Dataset,
        Self::Metrics,
        Self::ClassificationMetrics,
        Self::SlicedClassificationMetrics,
        Self::Html,
        Self::Markdown,
    ];

    /// Schema title identifying this kind to external consumers.
    #[must_use]
    pub const fn schema_title(self) -> &'static str {
        match self {
            Self::Artifact => "system.Artifact",
            Self::Model => "system.Model",
            Self::Dataset => "system.Dataset",
            Self::Metrics => "system.Metrics",
            Self::ClassificationMetrics => "system.ClassificationMetrics",
            Self::SlicedClassificationMetrics => "system.SlicedClassificationMetrics",
            Self::Html => "system.HTML",
            Self::Markdown => "system.Markdown",
        }
    }

    /// Resolve a schema title through the registry.
    #[must_use]
    pub fn from_schema_title(schema_title: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.schema_title() == schema_title)
    }
}

impl FromStr for ArtifactKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_schema_title(s).ok_or_else(|| Error::UnknownSchemaTitle(s.to_string()))
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_title())
    }
}

/// Generic machine learning artifact.
///
/// Use this kind when an artifact does not fit a more specific variant. The
/// `uri` is the single source of truth for location; `path` is derived.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Artifact {
    name: String,
    uri: String,
    metadata: Metadata,
}

impl Artifact {
    /// Create an empty artifact (no name, no URI, no metadata).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder; every field is optional.
    #[must_use]
    pub fn builder() -> ArtifactBuilder {
        ArtifactBuilder::default()
    }
}

impl ArtifactType for Artifact {
    const KIND: ArtifactKind = ArtifactKind::Artifact;

    fn base(&self) -> &Artifact {
        self
    }

    fn base_mut(&mut self) -> &mut Artifact {
        self
    }

    fn into_base(self) -> Artifact {
        self
    }
}

/// Common interface of every artifact variant.
pub trait ArtifactType: From<Artifact> + Default {
    /// Registry kind of this variant.
    const KIND: ArtifactKind;

    /// Underlying record.
    fn base(&self) -> &Artifact;

    /// Underlying record, mutably.
    fn base_mut(&mut self) -> &mut Artifact;

    /// Consume the variant, keeping the record.
    fn into_base(self) -> Artifact;

    /// Create an artifact of this kind located at `uri`.
    #[must_use]
    fn from_uri(uri: impl Into<String>) -> Self {
        Artifact::builder().uri(uri).build_as()
    }

    /// Schema title of this variant.
    fn schema_title(&self) -> &'static str {
        Self::KIND.schema_title()
    }

    /// Schema version of this variant.
    fn schema_version(&self) -> &'static str {
        SCHEMA_VERSION
    }

    /// Display name.
    fn name(&self) -> &str {
        &self.base().name
    }

    /// Set the display name.
    fn set_name(&mut self, name: impl Into<String>) {
        self.base_mut().name = name.into();
    }

    /// Canonical location, empty when unset.
    fn uri(&self) -> &str {
        &self.base().uri
    }

    /// Set the canonical location.
    fn set_uri(&mut self, uri: impl Into<String>) {
        self.base_mut().uri = uri.into();
    }

    /// Free-form metadata.
    fn metadata(&self) -> &Metadata {
        &self.base().metadata
    }

    /// Free-form metadata, mutably.
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.base_mut().metadata
    }

    /// Local path a task uses to read or write the content.
    fn path(&self) -> String {
        local_path_for_uri(self.uri())
    }

    /// Point the artifact at a local path, rewriting `uri` to the remote form.
    fn set_path(&mut self, path: &str) {
        self.base_mut().uri = remote_uri_for_path(path);
    }
}

/// Builder for `Artifact` and its variants.
#[derive(Debug, Default)]
pub struct ArtifactBuilder {
    name: Option<String>,
    uri: Option<String>,
    metadata: Option<Metadata>,
}

impl ArtifactBuilder {
    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the location.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the initial metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Build the generic `Artifact`.
    #[must_use]
    pub fn build(self) -> Artifact {
        Artifact {
            name: self.name.unwrap_or_default(),
            uri: self.uri.unwrap_or_default(),
            metadata: self.metadata.unwrap_or_default(),
        }
    }

    /// Build a specific variant.
    #[must_use]
    pub fn build_as<T: ArtifactType>(self) -> T {
        T::from(self.build())
    }
}

/// Any registered artifact variant, as reconstructed from a schema title.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyArtifact {
    /// `system.Artifact`
    Artifact(Artifact),
    /// `system.Model`
    Model(Model),
    /// `system.Dataset`
    Dataset(Dataset),
    /// `system.Metrics`
    Metrics(Metrics),
    /// `system.ClassificationMetrics`
    ClassificationMetrics(ClassificationMetrics),
    /// `system.SlicedClassificationMetrics`
    SlicedClassificationMetrics(SlicedClassificationMetrics),
    /// `system.HTML`
    Html(Html),
    /// `system.Markdown`
    Markdown(Markdown),
}

macro_rules! each_variant {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnyArtifact::Artifact($inner) => $body,
            AnyArtifact::Model($inner) => $body,
            AnyArtifact::Dataset($inner) => $body,
            AnyArtifact::Metrics($inner) => $body,
            AnyArtifact::ClassificationMetrics($inner) => $body,
            AnyArtifact::SlicedClassificationMetrics($inner) => $body,
            AnyArtifact::Html($inner) => $body,
            AnyArtifact::Markdown($inner) => $body,
        }
    };
}

impl AnyArtifact {
    /// Wrap `artifact` as the variant registered for `kind`.
    #[must_use]
    pub fn from_artifact(kind: ArtifactKind, artifact: Artifact) -> Self {
        match kind {
            ArtifactKind::Artifact => Self::Artifact(artifact),
            ArtifactKind::Model => Self::Model(artifact.into()),
            ArtifactKind::Dataset => Self::Dataset(artifact.into()),
            ArtifactKind::Metrics => Self::Metrics(artifact.into()),
            ArtifactKind::ClassificationMetrics => Self::ClassificationMetrics(artifact.into()),
            ArtifactKind::SlicedClassificationMetrics => {
                Self::SlicedClassificationMetrics(artifact.into())
            }
            ArtifactKind::Html => Self::Html(artifact.into()),
            ArtifactKind::Markdown => Self::Markdown(artifact.into()),
        }
    }

    /// Registry kind of the wrapped variant.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::Artifact(_) => ArtifactKind::Artifact,
            Self::Model(_) => ArtifactKind::Model,
            Self::Dataset(_) => ArtifactKind::Dataset,
            Self::Metrics(_) => ArtifactKind::Metrics,
            Self::ClassificationMetrics(_) => ArtifactKind::ClassificationMetrics,
            Self::SlicedClassificationMetrics(_) => ArtifactKind::SlicedClassificationMetrics,
            Self::Html(_) => ArtifactKind::Html,
            Self::Markdown(_) => ArtifactKind::Markdown,
        }
    }

    /// Schema title of the wrapped variant.
    #[must_use]
    pub const fn schema_title(&self) -> &'static str {
        self.kind().schema_title()
    }

    /// Schema version of the wrapped variant.
    #[must_use]
    pub const fn schema_version(&self) -> &'static str {
        SCHEMA_VERSION
    }

    /// Underlying record.
    #[must_use]
    pub fn base(&self) -> &Artifact {
        each_variant!(self, a => a.base())
    }

    /// Local path, using the wrapped variant's path rules.
    #[must_use]
    pub fn path(&self) -> String {
        each_variant!(self, a => a.path())
    }

    /// Consume the wrapper, keeping the record.
    #[must_use]
    pub fn into_base(self) -> Artifact {
        each_variant!(self, a => a.into_base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_empty() {
        let artifact = Artifact::builder().build();
        assert_eq!(artifact.name(), "");
        assert_eq!(artifact.uri(), "");
        assert!(artifact.metadata().is_empty());
        assert_eq!(artifact, Artifact::new());
    }

    #[test]
    fn test_registry_resolves_every_kind() {
        for kind in ArtifactKind::ALL {
            assert_eq!(ArtifactKind::from_schema_title(kind.schema_title()), Some(kind));
        }
        assert_eq!(ArtifactKind::from_schema_title("system.Unknown"), None);
    }

    #[test]
    fn test_registry_titles_are_unique() {
        let mut titles: Vec<_> = ArtifactKind::ALL.iter().map(|k| k.schema_title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), ArtifactKind::ALL.len());
    }

    #[test]
    fn test_from_str_unknown_title() {
        let err = "system.Nope".parse::<ArtifactKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownSchemaTitle(t) if t == "system.Nope"));
    }

    #[test]
    fn test_every_variant_reports_schema_version() {
        assert_eq!(Artifact::new().schema_version(), SCHEMA_VERSION);
        assert_eq!(Model::default().schema_version(), "0.0.1");
        assert_eq!(SlicedClassificationMetrics::default().schema_version(), "0.0.1");
        let any = AnyArtifact::from_artifact(ArtifactKind::Html, Artifact::new());
        assert_eq!(any.schema_version(), SCHEMA_VERSION);
    }

    #[test]
    fn test_set_path_rewrites_uri() {
        let mut artifact = Artifact::from_uri("gs://bucket/a");
        artifact.set_path("/minio/bucket/b");
        assert_eq!(artifact.uri(), "minio://bucket/b");
        assert_eq!(artifact.path(), "/minio/bucket/b");
    }

    #[test]
    fn test_any_artifact_keeps_kind_and_record() {
        let base = Artifact::builder().name("m").uri("oci://r/m").build();
        let any = AnyArtifact::from_artifact(ArtifactKind::Model, base.clone());
        assert_eq!(any.kind(), ArtifactKind::Model);
        assert_eq!(any.schema_title(), "system.Model");
        assert_eq!(any.path(), "/oci/r_m/models");
        assert_eq!(any.into_base(), base);
    }
}
