//! Artifact Record - persisted form of an artifact, resolved through the registry

use serde::{Deserialize, Serialize};

use super::{AnyArtifact, Artifact, ArtifactKind, ArtifactType, Metadata, SCHEMA_VERSION};
use crate::Result;

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Artifact Record is the serialized representation of any artifact kind.
///
/// The `schema_title` selects the variant when the record is turned back into
/// an artifact; every other field is carried over unchanged.
///
/// ## JSON Format
///
/// ```json
/// {
///   "schemaTitle": "system.Model",
///   "schemaVersion": "0.0.1",
///   "name": "classifier",
///   "uri": "gs://bucket/models/classifier",
///   "metadata": { "framework": "pytorch" }
/// }
/// ```
///
/// Only `schemaTitle` is required when reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    schema_title: String,
    #[serde(default = "default_schema_version")]
    schema_version: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    metadata: Metadata,
}

impl ArtifactRecord {
    /// Capture the record of a typed artifact.
    #[must_use]
    pub fn from_artifact<T: ArtifactType>(artifact: &T) -> Self {
        let mut record = Self::with_title(artifact.schema_title(), artifact.base());
        record.schema_version = artifact.schema_version().to_string();
        record
    }

    /// Capture the record of an artifact of any kind.
    #[must_use]
    pub fn from_any(artifact: &AnyArtifact) -> Self {
        Self::with_title(artifact.schema_title(), artifact.base())
    }

    fn with_title(schema_title: &str, base: &Artifact) -> Self {
        Self {
            schema_title: schema_title.to_string(),
            schema_version: default_schema_version(),
            name: base.name.clone(),
            uri: base.uri.clone(),
            metadata: base.metadata.clone(),
        }
    }

    /// Get the schema title.
    #[must_use]
    pub fn schema_title(&self) -> &str {
        &self.schema_title
    }

    /// Get the schema version.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Get the artifact name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the artifact URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Get the artifact metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Resolve the registry kind of this record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownSchemaTitle`] for unregistered titles.
    pub fn kind(&self) -> Result<ArtifactKind> {
        self.schema_title.parse()
    }

    /// Rebuild the artifact as the variant registered for its schema title.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownSchemaTitle`] for unregistered titles.
    pub fn into_artifact(self) -> Result<AnyArtifact> {
        let kind = self.kind()?;
        let base = Artifact {
            name: self.name,
            uri: self.uri,
            metadata: self.metadata,
        };
        Ok(AnyArtifact::from_artifact(kind, base))
    }

    /// Parse a record from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the JSON is not a record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the record to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
