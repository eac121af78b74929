//! Integration tests for loading document data files.

use std::fs;
use tempfile::tempdir;

use sndoc_core::{load_data_file, CoreError, DocumentType, User};

#[test]
fn test_load_yaml_data_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("incident.yaml");
    fs::write(
        &path,
        r#"
project_name: ServiceNow ITSM導入プロジェクト
author:
  name: 山田太郎
  email: yamada@example.com
incident_types:
  - システム障害
  - パフォーマンス問題
"#,
    )
    .unwrap();

    let data = load_data_file(&path).unwrap();
    assert_eq!(data["project_name"], "ServiceNow ITSM導入プロジェクト");
    assert_eq!(data["author"]["email"], "yamada@example.com");
    assert_eq!(data["incident_types"].as_array().unwrap().len(), 2);
}

#[test]
fn test_load_json_data_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("slm.json");
    fs::write(&path, r#"{"project_name": "SLM設計", "version": "1.0"}"#).unwrap();

    let data = load_data_file(&path).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["version"], "1.0");
}

#[test]
fn test_missing_data_file() {
    let temp = tempdir().unwrap();
    let err = load_data_file(temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CoreError::DataNotFound(_)));
}

#[test]
fn test_non_mapping_reports_path() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("list.yml");
    fs::write(&path, "- one\n- two\n").unwrap();

    match load_data_file(&path).unwrap_err() {
        CoreError::InvalidData { path: reported, message } => {
            assert_eq!(reported, path);
            assert!(message.contains("array"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_json_is_an_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{\"project_name\": ").unwrap();

    assert!(matches!(load_data_file(&path), Err(CoreError::Json(_))));
}

#[test]
fn test_every_type_round_trips_through_its_key() {
    for doc_type in DocumentType::all() {
        assert_eq!(doc_type.key().parse::<DocumentType>().unwrap(), doc_type);
        assert_eq!(doc_type.label().parse::<DocumentType>().unwrap(), doc_type);
    }
}

#[test]
fn test_user_deserializes_without_optional_fields() {
    let user: User = serde_yaml::from_str("name: 佐藤\nemail: sato@example.com\n").unwrap();
    assert_eq!(user, User::new("佐藤", "sato@example.com"));
}
