//! Loading snapshots from disk

use nms_source::{NmsSource, SnapshotSource, SourceError};

#[tokio::test]
async fn test_from_path_reads_snapshot() {
    let path = std::env::temp_dir().join(format!("nms-snapshot-{}.json", std::process::id()));
    tokio::fs::write(
        &path,
        r#"{ "device_groups": { "Core": ["dev-1"] }, "devices": { "dev-1": { "name": "sw1" } } }"#,
    )
    .await
    .unwrap();

    let source = SnapshotSource::from_path(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(source.device_ids("Core").await.unwrap(), vec!["dev-1"]);
    assert_eq!(source.device("dev-1").await.unwrap().name.as_deref(), Some("sw1"));
}

#[tokio::test]
async fn test_from_path_missing_file() {
    let result = SnapshotSource::from_path("/nonexistent/nms-snapshot.json").await;
    assert!(matches!(result, Err(SourceError::Io(_))));
}

#[test]
fn test_malformed_snapshot() {
    let result = SnapshotSource::from_json(r#"{ "devices": [] }"#);
    assert!(matches!(result, Err(SourceError::Parse(_))));
}
