//! Tests for error types

use pipeline_artifacts::Error;

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("Invalid row. Expected size: 2 got: 3".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("Expected size: 2 got: 3"));
}

#[test]
fn test_task_root_unset_error() {
    let error = Error::TaskRootUnset;
    let error_str = format!("{error}");
    assert!(error_str.contains("can only be called at task runtime"));
    assert!(error_str.contains("task root is unknown"));
}

#[test]
fn test_unknown_schema_title_error() {
    let error = Error::UnknownSchemaTitle("system.Foo".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Unknown schema title"));
    assert!(error_str.contains("system.Foo"));
}

#[test]
fn test_serialization_error_from_serde_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
    let error: Error = json_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("Serialization error"));
}

#[test]
fn test_error_debug() {
    let error = Error::InvalidInput("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidInput"));
}
