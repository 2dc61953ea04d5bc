//! # pipeline-artifacts: Typed ML Pipeline Artifacts
//!
//! Metadata records for the artifacts that pipeline tasks produce and consume
//! (models, datasets, metrics, rendered reports), plus translation between
//! remote storage URIs and the local mount paths tasks read and write.
//!
//! ## Design Principles
//!
//! - **Single source of truth**: an artifact stores only its `uri`; the local
//!   `path` is always derived from it
//! - **Validate before mutate**: metrics helpers reject bad shapes before
//!   touching the published metadata
//! - **Explicit context**: the task root is a [`context::TaskContext`] value,
//!   never process-global state
//! - **Static registry**: schema titles resolve through
//!   [`artifact::ArtifactKind`], a fixed lookup table
//!
//! ## Example Usage
//!
//! ```rust
//! use pipeline_artifacts::artifact::{ArtifactType, ClassificationMetrics};
//! use pipeline_artifacts::context::TaskContext;
//!
//! let ctx = TaskContext::new("/gcs/bucket/pipeline/run-7/train");
//! let mut metrics = ClassificationMetrics::from_uri(ctx.get_uri(Some("eval"))?);
//! metrics.log_confusion_matrix(["pos", "neg"], &[[40, 2], [5, 53]])?;
//!
//! assert_eq!(metrics.uri(), "gs://bucket/pipeline/run-7/train/eval");
//! assert_eq!(metrics.path(), "/gcs/bucket/pipeline/run-7/train/eval");
//! # Ok::<(), pipeline_artifacts::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod artifact;
pub mod context;
pub mod error;
pub mod uri;

pub use artifact::{
    AnyArtifact, Artifact, ArtifactKind, ArtifactRecord, ArtifactType, ClassificationMetrics,
    Dataset, Html, Markdown, Metadata, Metrics, Model, SlicedClassificationMetrics,
};
pub use context::TaskContext;
pub use error::{Error, Result};
pub use uri::RemotePrefix;
