//! Model artifact

use serde_json::Value;

use super::{Artifact, ArtifactKind, ArtifactType};
use crate::uri::{local_path_for_uri, RemotePrefix, OCI_MODEL_SUFFIX};

const FRAMEWORK_KEY: &str = "framework";

/// An artifact representing a machine learning model.
///
/// Models stored as OCI images (modelcars) keep their files under `/models`
/// inside the image, so their local path carries that suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    base: Artifact,
}

impl Model {
    /// Framework the model was built with, empty when unset.
    #[must_use]
    pub fn framework(&self) -> &str {
        self.base
            .metadata
            .get(FRAMEWORK_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Record the framework in `metadata["framework"]`.
    pub fn set_framework(&mut self, framework: impl Into<String>) {
        self.base
            .metadata
            .insert(FRAMEWORK_KEY.to_string(), Value::String(framework.into()));
    }
}

impl From<Artifact> for Model {
    fn from(base: Artifact) -> Self {
        Self { base }
    }
}

impl ArtifactType for Model {
    const KIND: ArtifactKind = ArtifactKind::Model;

    fn base(&self) -> &Artifact {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Artifact {
        &mut self.base
    }

    fn into_base(self) -> Artifact {
        self.base
    }

    fn path(&self) -> String {
        let path = local_path_for_uri(self.uri());
        if self.uri().starts_with(RemotePrefix::Oci.scheme()) {
            path + OCI_MODEL_SUFFIX
        } else {
            path
        }
    }
}
