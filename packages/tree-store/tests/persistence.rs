use std::fs;

use serde_json::json;

use jsonfs_tree_store::{path, Error, JsonFileStorage, Node, Tree, TreeStore};

fn write_document(dir: &tempfile::TempDir, value: &serde_json::Value) -> std::path::PathBuf {
    let file_path = dir.path().join("data.json");
    fs::write(&file_path, serde_json::to_vec(value).unwrap()).unwrap();
    file_path
}

#[test]
fn document_key_order_survives_load_and_store() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = write_document(&dir, &json!({"zebra": 1, "apple": {"mango": 2, "kiwi": 3}}));

    let mut store = TreeStore::open(JsonFileStorage::new(&file_path)).unwrap();
    store.flush().unwrap();

    let text = fs::read_to_string(&file_path).unwrap();
    let zebra = text.find("zebra").unwrap();
    let apple = text.find("apple").unwrap();
    let mango = text.find("mango").unwrap();
    let kiwi = text.find("kiwi").unwrap();
    assert!(zebra < apple);
    assert!(mango < kiwi);
}

#[test]
fn every_mutation_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.json");
    let mut store = TreeStore::open(JsonFileStorage::new(&file_path)).unwrap();

    store
        .mutate(|tree| {
            tree.insert(&path!("/config"), "name", Node::empty_file())?;
            tree.leaf_or_insert(&path!("/config/name"))?.replace("jsonfs");
            Ok::<_, Error>(())
        })
        .unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_slice(&fs::read(&file_path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"config": {"name": "jsonfs"}}));
    assert_eq!(fs::read(&file_path).unwrap(), store.tree().serialize().unwrap());

    store
        .mutate(|tree| tree.remove(&path!("/"), "config").map(|_| ()))
        .unwrap();
    assert_eq!(fs::read(&file_path).unwrap(), b"{}");
}

#[test]
fn reopen_sees_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.json");

    let mut store = TreeStore::open(JsonFileStorage::new(&file_path)).unwrap();
    store
        .mutate(|tree| tree.insert(&path!("/a/b"), "c", Node::directory()).map(|_| ()))
        .unwrap();
    let expected = store.tree().clone();
    store.close().unwrap();

    let reopened = TreeStore::open(JsonFileStorage::new(&file_path)).unwrap();
    assert_eq!(reopened.tree(), &expected);
}

#[test]
fn round_trip_of_mixed_document() {
    let tree = Tree::from_json(json!({
        "string": "text",
        "int": -7,
        "float": 2.25,
        "bool": false,
        "null": null,
        "list": [1, "two", {"three": 3}],
        "empty": {},
        "nested": {"deeper": {"deepest": "leaf"}}
    }))
    .unwrap();

    let bytes = tree.serialize().unwrap();
    assert_eq!(Tree::load(&bytes).unwrap(), tree);
    assert_eq!(Tree::load(&bytes).unwrap().serialize().unwrap(), bytes);
}

#[test]
fn corrupt_document_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.json");
    fs::write(&file_path, "{ not json").unwrap();

    assert!(matches!(
        TreeStore::open(JsonFileStorage::new(&file_path)),
        Err(Error::Json(_))
    ));
}

#[test]
fn big_integers_keep_their_digits() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.json");
    fs::write(&file_path, r#"{"id": 123456789012345678901234567890, "d": {}}"#).unwrap();

    let mut store = TreeStore::open(JsonFileStorage::new(&file_path)).unwrap();
    let id = store.tree().resolve(&path!("/id")).unwrap();
    assert_eq!(id.as_leaf().unwrap().render(), "123456789012345678901234567890");

    store
        .mutate(|tree| tree.insert(&path!("/"), "other", Node::directory()).map(|_| ()))
        .unwrap();

    let text = fs::read_to_string(&file_path).unwrap();
    assert!(text.contains("\"id\": 123456789012345678901234567890,"));
}
