//! Task context - runtime-provided task root and output URI derivation
//!
//! The hosting runtime builds one [`TaskContext`] per task execution and hands
//! it to any code that needs to derive storage locations. A context without a
//! task root models code running outside a task (e.g. at pipeline authoring
//! time), where deriving a URI is a usage error.
//!
//! ```rust
//! use pipeline_artifacts::context::TaskContext;
//!
//! let ctx = TaskContext::builder().task_root("/gcs/bucket/run-1/task-a").build();
//! assert_eq!(ctx.get_uri(None)?, "gs://bucket/run-1/task-a/Output");
//! assert_eq!(ctx.get_uri(Some("model"))?, "gs://bucket/run-1/task-a/model");
//! # Ok::<(), pipeline_artifacts::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::uri::remote_uri_for_path;
use crate::{Error, Result};

/// Suffix used by [`TaskContext::get_uri`] when none is given.
///
/// Matches the default output key of a single-output component.
pub const DEFAULT_URI_SUFFIX: &str = "Output";

/// Legacy task root for which URI derivation is not supported.
pub const UNSUPPORTED_TASK_ROOT: &str = "/tmp/kfp_outputs";

/// Per-task runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContext {
    #[serde(default)]
    task_root: Option<String>,
}

impl TaskContext {
    /// Create a context for a task rooted at `task_root` (local mount form).
    #[must_use]
    pub fn new(task_root: impl Into<String>) -> Self {
        Self {
            task_root: Some(task_root.into()),
        }
    }

    /// Create a context with no task root (outside task runtime).
    #[must_use]
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Create a builder for the context.
    #[must_use]
    pub fn builder() -> TaskContextBuilder {
        TaskContextBuilder::default()
    }

    /// Get the task root, if the runtime provided one.
    #[must_use]
    pub fn task_root(&self) -> Option<&str> {
        self.task_root.as_deref()
    }

    /// Get the task root URI joined with `suffix` (default `"Output"`).
    ///
    /// The task root is translated from its local mount form to a remote URI
    /// before joining. Returns an empty string, with a warning, when the task
    /// root is the legacy [`UNSUPPORTED_TASK_ROOT`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::TaskRootUnset`] if the context has no task root.
    pub fn get_uri(&self, suffix: Option<&str>) -> Result<String> {
        let task_root = self.task_root.as_deref().ok_or(Error::TaskRootUnset)?;

        if task_root == UNSUPPORTED_TASK_ROOT {
            tracing::warn!(
                task_root,
                "get_uri is not yet supported by the pipeline backend. Please specify a URI explicitly."
            );
            return Ok(String::new());
        }

        let remote_root = remote_uri_for_path(task_root);
        Ok(join_uri(&remote_root, suffix.unwrap_or(DEFAULT_URI_SUFFIX)))
    }
}

/// Builder for `TaskContext`.
#[derive(Debug, Default)]
pub struct TaskContextBuilder {
    task_root: Option<String>,
}

impl TaskContextBuilder {
    /// Set the task root in local mount form (e.g. `/gcs/bucket/task`).
    #[must_use]
    pub fn task_root(mut self, task_root: impl Into<String>) -> Self {
        self.task_root = Some(task_root.into());
        self
    }

    /// Build the `TaskContext`.
    #[must_use]
    pub fn build(self) -> TaskContext {
        TaskContext {
            task_root: self.task_root,
        }
    }
}

/// POSIX path join: an absolute `tail` replaces `base`.
fn join_uri(base: &str, tail: &str) -> String {
    if tail.starts_with('/') || base.is_empty() {
        tail.to_string()
    } else if base.ends_with('/') {
        format!("{base}{tail}")
    } else {
        format!("{base}/{tail}")
    }
}
