//! Remote URI ⇄ local mount path translation
//!
//! Executing tasks read and write artifact content through local mounts of the
//! remote object stores. Each remote scheme maps to one mount root:
//!
//! | Scheme     | Mount     |
//! |------------|-----------|
//! | `gs://`    | `/gcs/`   |
//! | `minio://` | `/minio/` |
//! | `s3://`    | `/s3/`    |
//! | `oci://`   | `/oci/`   |
//!
//! OCI image references cannot be nested directories, so every `/` after the
//! scheme becomes `_` in the local path. The reverse mapping turns every `_`
//! back into `/` and drops a trailing `/models` (the model-image layout used by
//! [`Model`](crate::artifact::Model) paths). Both directions are lossy for OCI
//! references that contain `_` or genuinely end in `/models`.
//!
//! ```rust
//! use pipeline_artifacts::uri::{local_path_for_uri, remote_uri_for_path};
//!
//! assert_eq!(local_path_for_uri("gs://bucket/obj"), "/gcs/bucket/obj");
//! assert_eq!(remote_uri_for_path("/gcs/bucket/obj"), "gs://bucket/obj");
//! assert_eq!(local_path_for_uri("oci://registry/repo"), "/oci/registry_repo");
//! assert_eq!(local_path_for_uri("/already/local"), "/already/local");
//! ```

/// Suffix appended to OCI model paths and stripped from OCI mount paths.
pub const OCI_MODEL_SUFFIX: &str = "/models";

/// Remote storage backends with a local mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemotePrefix {
    /// Google Cloud Storage
    Gcs,
    /// `MinIO` object storage
    Minio,
    /// Amazon S3
    S3,
    /// OCI container registry (model images)
    Oci,
}

impl RemotePrefix {
    /// All backends, in lookup order.
    pub const ALL: [Self; 4] = [Self::Gcs, Self::Minio, Self::S3, Self::Oci];

    /// URI scheme prefix, e.g. `gs://`.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Gcs => "gs://",
            Self::Minio => "minio://",
            Self::S3 => "s3://",
            Self::Oci => "oci://",
        }
    }

    /// Local mount root, e.g. `/gcs/`.
    #[must_use]
    pub const fn local_mount(self) -> &'static str {
        match self {
            Self::Gcs => "/gcs/",
            Self::Minio => "/minio/",
            Self::S3 => "/s3/",
            Self::Oci => "/oci/",
        }
    }

    /// Backend whose scheme prefixes `uri`, if any.
    #[must_use]
    pub fn for_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| uri.starts_with(p.scheme()))
    }

    /// Backend whose mount root prefixes `path`, if any.
    #[must_use]
    pub fn for_local_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| path.starts_with(p.local_mount()))
    }
}

/// Translate a remote URI into the local path a task uses to access it.
///
/// URIs without a known scheme are returned unchanged (local execution, where
/// the URI already is a path).
#[must_use]
pub fn local_path_for_uri(uri: &str) -> String {
    let Some(prefix) = RemotePrefix::for_uri(uri) else {
        return uri.to_string();
    };
    let rest = &uri[prefix.scheme().len()..];
    match prefix {
        RemotePrefix::Oci => format!("{}{}", prefix.local_mount(), rest.replace('/', "_")),
        _ => format!("{}{rest}", prefix.local_mount()),
    }
}

/// Translate a local mount path back into its remote URI.
///
/// Paths outside every known mount are returned unchanged.
#[must_use]
pub fn remote_uri_for_path(path: &str) -> String {
    let Some(prefix) = RemotePrefix::for_local_path(path) else {
        return path.to_string();
    };
    let rest = &path[prefix.local_mount().len()..];
    match prefix {
        RemotePrefix::Oci => {
            let remote = rest.replace('_', "/");
            let remote = remote.strip_suffix(OCI_MODEL_SUFFIX).unwrap_or(&remote);
            format!("{}{remote}", prefix.scheme())
        }
        _ => format!("{}{rest}", prefix.scheme()),
    }
}
