use product_store::{JsonFileStorage, Record, RecordStore, StoreError, StoreOptions};
use serde_json::json;

use crate::support::{product, temp_store};

#[tokio::test]
async fn missing_file_lists_empty() {
    let (dir, store) = temp_store();
    assert!(store.list().await.unwrap().is_empty());
    assert!(!dir.path().join("productos.json").exists());
}

#[tokio::test]
async fn empty_and_null_files_list_empty() {
    let dir = tempfile::tempdir().unwrap();

    for (name, content) in [("empty.json", ""), ("blank.json", "  \n"), ("null.json", "null")] {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        let store = RecordStore::open(&path);
        assert!(store.list().await.unwrap().is_empty(), "{} should be empty", name);
    }
}

#[tokio::test]
async fn malformed_file_is_not_masked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"products\": []}").unwrap();
    let store = RecordStore::open(&path);

    assert!(matches!(store.list().await, Err(StoreError::Malformed(_))));
    assert!(matches!(store.delete(1).await, Err(StoreError::Malformed(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"products\": []}");
}

#[tokio::test]
async fn truncated_file_blocks_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cut.json");
    let content = r#"[{"id":1,"code":"A"},{"id":2,"code":"B""#;
    std::fs::write(&path, content).unwrap();
    let store = RecordStore::open(&path);

    assert!(matches!(store.list().await, Err(StoreError::Malformed(_))));
    let err = store.add(Record::with_code("A")).await.unwrap_err();
    assert!(matches!(err, StoreError::Malformed(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn exhausted_ids_reject_inserts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full.json");
    let content = json!([{ "id": u64::MAX, "code": "A" }]).to_string();
    std::fs::write(&path, &content).unwrap();
    let store = RecordStore::open(&path);

    let err = store.add(Record::with_code("B")).await.unwrap_err();
    assert_eq!(err, StoreError::Malformed("id space exhausted".into()));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[tokio::test]
async fn duplicate_leaves_file_byte_for_byte() {
    let (dir, store) = temp_store();
    let path = dir.path().join("productos.json");
    store.add(product("P001")).await.unwrap();
    let before = std::fs::read(&path).unwrap();

    assert!(store.add(product("P001")).await.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test]
async fn file_is_a_pretty_json_array() {
    let (dir, store) = temp_store();
    store.add(Record::with_code("P001").with("stock", 10)).await.unwrap();

    let text = std::fs::read_to_string(dir.path().join("productos.json")).unwrap();
    assert_eq!(
        text,
        "[\n  {\n    \"code\": \"P001\",\n    \"stock\": 10,\n    \"id\": 1\n  }\n]"
    );
}

#[tokio::test]
async fn compact_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compact.json");
    let store = RecordStore::with_options(
        JsonFileStorage::new(&path),
        StoreOptions::default().pretty(false),
    );
    store.add(product("A")).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));

    let reopened = RecordStore::open(&path);
    assert_eq!(reopened.list().await.unwrap(), store.list().await.unwrap());
}

#[tokio::test]
async fn next_id_recomputed_after_external_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");
    let store = RecordStore::open(&path);
    store.add(product("A")).await.unwrap();

    std::fs::write(
        &path,
        json!([{ "id": 1, "code": "A" }, { "id": 40, "code": "Z" }]).to_string(),
    )
    .unwrap();

    let stored = store.add(product("B")).await.unwrap();
    assert_eq!(stored.id(), Some(41));
}

#[tokio::test]
async fn unknown_fields_survive_a_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.json");
    std::fs::write(
        &path,
        json!([{ "id": 1, "code": "A", "tags": ["x", "y"], "meta": { "origin": "import" } }])
            .to_string(),
    )
    .unwrap();
    let store = RecordStore::open(&path);

    store.add(product("B")).await.unwrap();
    let first = store.get(1).await.unwrap().unwrap();
    assert_eq!(first.get("tags"), Some(&json!(["x", "y"])));
    assert_eq!(first.get("meta"), Some(&json!({ "origin": "import" })));
}
