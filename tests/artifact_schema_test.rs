//! Artifact Schema Tests
//!
//! End-to-end checks of the artifact model through the public API: location
//! translation, metrics logging, slices and registry reconstruction.

use pipeline_artifacts::artifact::{
    AnyArtifact, Artifact, ArtifactKind, ArtifactRecord, ArtifactType, ClassificationMetrics,
    Dataset, Html, Markdown, Metrics, Model, SlicedClassificationMetrics,
};
use pipeline_artifacts::uri::{local_path_for_uri, remote_uri_for_path, RemotePrefix};
use pipeline_artifacts::Error;
use serde_json::json;

// =============================================================================
// Location Tests
// =============================================================================

#[test]
fn test_remote_schemes_map_to_mounts_and_back() {
    for prefix in [RemotePrefix::Gcs, RemotePrefix::Minio, RemotePrefix::S3] {
        let uri = format!("{}bucket/dir/file.txt", prefix.scheme());
        let path = local_path_for_uri(&uri);
        assert_eq!(path, format!("{}bucket/dir/file.txt", prefix.local_mount()));
        assert_eq!(remote_uri_for_path(&path), uri);
    }
}

#[test]
fn test_oci_uri_escapes_slashes() {
    let artifact = Artifact::from_uri("oci://registry/ns/repo:tag");
    assert_eq!(artifact.path(), "/oci/registry_ns_repo:tag");
}

#[test]
fn test_model_oci_path() {
    let model = Model::from_uri("oci://registry/repo");
    assert_eq!(model.path(), "/oci/registry_repo/models");
}

#[test]
fn test_gcs_path_to_uri() {
    let mut artifact = Artifact::new();
    artifact.set_path("/gcs/bucket/obj");
    assert_eq!(artifact.uri(), "gs://bucket/obj");
}

#[test]
fn test_non_model_oci_path_ending_in_models_is_lossy() {
    let mut dataset = Dataset::from_uri("oci://registry/models");
    let path = dataset.path();
    assert_eq!(path, "/oci/registry_models");
    dataset.set_path(&path);
    assert_eq!(dataset.uri(), "oci://registry");
}

#[test]
fn test_local_uri_is_its_own_path() {
    let mut markdown = Markdown::from_uri("/tmp/report.md");
    assert_eq!(markdown.path(), "/tmp/report.md");
    markdown.set_path("relative/out.md");
    assert_eq!(markdown.uri(), "relative/out.md");
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_builder_sets_all_fields() {
    let metadata = json!({"rows": 1200}).as_object().cloned().unwrap();
    let dataset: Dataset = Artifact::builder()
        .name("train")
        .uri("s3://bucket/train.parquet")
        .metadata(metadata)
        .build_as();

    assert_eq!(dataset.name(), "train");
    assert_eq!(dataset.uri(), "s3://bucket/train.parquet");
    assert_eq!(dataset.metadata()["rows"], 1200);
    assert_eq!(dataset.schema_title(), "system.Dataset");
}

#[test]
fn test_defaults_are_not_shared() {
    let mut first = Metrics::default();
    let second = Metrics::default();
    first.log_metric("auc", 0.9);
    assert!(second.metadata().is_empty());
}

// =============================================================================
// ClassificationMetrics Tests
// =============================================================================

#[test]
fn test_log_roc_curve() {
    let mut metrics = ClassificationMetrics::default();
    metrics
        .log_roc_curve(&[0.1, 0.2], &[0.5, 0.6], &[0.9, 0.8])
        .unwrap();

    assert_eq!(
        metrics.metadata()["confidenceMetrics"],
        json!([
            {"confidenceThreshold": 0.9, "recall": 0.5, "falsePositiveRate": 0.1},
            {"confidenceThreshold": 0.8, "recall": 0.6, "falsePositiveRate": 0.2},
        ])
    );
}

#[test]
fn test_log_roc_curve_mismatched_lengths() {
    let mut metrics = ClassificationMetrics::default();
    let result = metrics.log_roc_curve(&[0.1, 0.2], &[0.5, 0.6, 0.7], &[0.9, 0.8]);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(metrics.metadata().is_empty());
}

#[test]
fn test_confusion_matrix_cell() {
    let mut metrics = ClassificationMetrics::default();
    metrics.set_confusion_matrix_categories(["a", "b"]);
    metrics.log_confusion_matrix_cell("a", "b", 5).unwrap();

    assert_eq!(
        metrics.metadata()["confusionMatrix"],
        json!({
            "annotationSpecs": [{"displayName": "a"}, {"displayName": "b"}],
            "rows": [{"row": [0, 5]}, {"row": [0, 0]}],
        })
    );
}

#[test]
fn test_confusion_matrix_row_unknown_category() {
    let mut metrics = ClassificationMetrics::default();
    metrics.set_confusion_matrix_categories(["a", "b"]);
    let before = metrics.clone();

    let result = metrics.log_confusion_matrix_row("z", &[1, 2]);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(metrics, before);
}

// =============================================================================
// SlicedClassificationMetrics Tests
// =============================================================================

#[test]
fn test_sliced_metrics_one_entry_per_slice() {
    let mut metrics = SlicedClassificationMetrics::default();
    metrics.log_roc_reading("sliceA", 0.9, 0.5, 0.1);
    metrics.log_roc_reading("sliceB", 0.7, 0.4, 0.3);

    assert_eq!(
        metrics.metadata()["evaluationSlices"],
        json!([
            {
                "slice": "sliceA",
                "sliceClassificationMetrics": {
                    "confidenceMetrics": [
                        {"confidenceThreshold": 0.9, "recall": 0.5, "falsePositiveRate": 0.1}
                    ]
                }
            },
            {
                "slice": "sliceB",
                "sliceClassificationMetrics": {
                    "confidenceMetrics": [
                        {"confidenceThreshold": 0.7, "recall": 0.4, "falsePositiveRate": 0.3}
                    ]
                }
            }
        ])
    );
}

#[test]
fn test_sliced_metrics_validation_delegates() {
    let mut metrics = SlicedClassificationMetrics::default();
    metrics.set_confusion_matrix_categories("s", ["a", "b"]);
    assert!(metrics.log_confusion_matrix_row("s", "a", &[1]).is_err());
    assert!(metrics.log_confusion_matrix_cell("s", "a", "q", 1).is_err());
    assert!(metrics
        .load_confusion_matrix("s", ["a", "b"], &[vec![1, 2]])
        .is_err());
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_registry_reconstructs_variants() {
    let mut html = Html::from_uri("gs://bucket/report.html");
    html.set_name("report");

    let json = ArtifactRecord::from_artifact(&html).to_json().unwrap();
    let any = ArtifactRecord::from_json(&json)
        .unwrap()
        .into_artifact()
        .unwrap();

    assert_eq!(any.kind(), ArtifactKind::Html);
    match any {
        AnyArtifact::Html(restored) => assert_eq!(restored, html),
        other => panic!("expected HTML artifact, got {other:?}"),
    }
}

#[test]
fn test_registry_rehydrates_classification_metrics() {
    let mut metrics = ClassificationMetrics::default();
    metrics
        .log_confusion_matrix(["a", "b"], &[[1, 2], [3, 4]])
        .unwrap();
    let record = ArtifactRecord::from_artifact(&metrics);

    let AnyArtifact::ClassificationMetrics(mut restored) = record.into_artifact().unwrap() else {
        panic!("expected classification metrics");
    };
    restored.log_confusion_matrix_cell("a", "b", 0).unwrap();
    assert_eq!(restored.matrix(), [vec![1, 0], vec![3, 4]]);
}

#[test]
fn test_registry_model_keeps_oci_layout() {
    let record = ArtifactRecord::from_json(
        r#"{"schemaTitle":"system.Model","uri":"oci://registry/llm","metadata":{"framework":"vllm"}}"#,
    )
    .unwrap();
    let any = record.into_artifact().unwrap();
    assert_eq!(any.path(), "/oci/registry_llm/models");
    let AnyArtifact::Model(model) = any else {
        panic!("expected model");
    };
    assert_eq!(model.framework(), "vllm");
}
