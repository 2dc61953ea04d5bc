//! Plain artifact kinds: datasets and rendered documents

use super::{Artifact, ArtifactKind};

/// An artifact representing a machine learning dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    base: Artifact,
}

/// An artifact representing an HTML file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Html {
    base: Artifact,
}

/// An artifact representing a markdown file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markdown {
    base: Artifact,
}

impl From<Artifact> for Dataset {
    fn from(base: Artifact) -> Self {
        Self { base }
    }
}

impl From<Artifact> for Html {
    fn from(base: Artifact) -> Self {
        Self { base }
    }
}

impl From<Artifact> for Markdown {
    fn from(base: Artifact) -> Self {
        Self { base }
    }
}

artifact_type!(Dataset, ArtifactKind::Dataset);
artifact_type!(Html, ArtifactKind::Html);
artifact_type!(Markdown, ArtifactKind::Markdown);
