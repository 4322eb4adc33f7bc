//! End-to-end tests of the store over a real directory
//!
//! Each test opens a disk-backed store, drives it through the public API,
//! and checks the `collection/key.ext` layout left on disk.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use suitcase_store::{
    Document, ErrorKind, Filesystem, Format, LocalFilesystem, NormalizedPath, Store, StoreConfig,
};

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

fn open(temp: &TempDir, format: Format) -> Store<LocalFilesystem> {
    let mut store = Store::with_format(LocalFilesystem::new(temp.path()).unwrap(), format);
    store.set_collection("collection");
    store
}

#[rstest]
#[case(Format::Json, "data.json", "{\n    \"foo\": {\n        \"bar\": \"baz\"\n    }\n}")]
#[case(
    Format::Xml,
    "data.xml",
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?><result><foo><bar>baz</bar></foo></result>"
)]
#[case(Format::Yaml, "data.yml", "foo:\n  bar: baz\n")]
#[case(Format::Csv, "data.csv", "foo.bar\nbaz\n")]
fn saved_item_has_the_persisted_layout(
    #[case] format: Format,
    #[case] filename: &str,
    #[case] expected: &str,
) {
    let temp = TempDir::new().unwrap();
    let store = open(&temp, format);

    store.save("data", &doc(json!({"foo": {"bar": "baz"}}))).unwrap();

    temp.child("collection").assert(predicate::path::is_dir());
    temp.child("collection").child(filename).assert(expected);
}

#[rstest]
#[case(Format::Json)]
#[case(Format::Xml)]
#[case(Format::Yaml)]
#[case(Format::Csv)]
fn full_lifecycle(#[case] format: Format) {
    let temp = TempDir::new().unwrap();
    let store = open(&temp, format);
    let alice = doc(json!({"name": "Alice", "address": {"city": "Paris"}}));
    let bob = doc(json!({"name": "Bob", "tags": ["ops", "dev"]}));

    store.save("alice", &alice).unwrap().save("bob", &bob).unwrap();
    assert_eq!(store.read("alice").unwrap(), alice);

    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["bob"], bob);

    let renamed = doc(json!({"name": "Alice B."}));
    store.save("alice", &renamed).unwrap();
    assert_eq!(store.read("alice").unwrap(), renamed);

    store.delete("bob").unwrap();
    assert!(!store.exists("bob").unwrap());

    let err = store.delete_collection("collection", false).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CollectionNotEmpty);
    temp.child("collection").assert(predicate::path::is_dir());

    store.delete_all().unwrap();
    assert!(store.read_all().unwrap().is_empty());

    store.delete_collection("collection", false).unwrap();
    temp.child("collection").assert(predicate::path::missing());
}

#[test]
fn files_written_by_hand_are_readable() {
    let temp = TempDir::new().unwrap();
    temp.child("users/alice.json")
        .write_str(r#"{"name": "Alice"}"#)
        .unwrap();
    temp.child("users/bob.json")
        .write_str(r#"{"name": "Bob"}"#)
        .unwrap();
    temp.child("users/.hidden").write_str("ignored").unwrap();

    let mut store = Store::new(LocalFilesystem::new(temp.path()).unwrap());
    store.set_collection("users");

    let all = store.read_all().unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["alice", "bob"]);
    assert_eq!(all["alice"], doc(json!({"name": "Alice"})));
}

#[test]
fn corrupt_file_fails_read_all_with_format_error() {
    let temp = TempDir::new().unwrap();
    temp.child("users/alice.json")
        .write_str(r#"{"name": "Alice"}"#)
        .unwrap();
    temp.child("users/broken.json").write_str("{").unwrap();

    let mut store = Store::new(LocalFilesystem::new(temp.path()).unwrap());
    store.set_collection("users");

    let err = store.read_all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.message(), "Error decoding data.");
}

#[test]
fn forced_delete_removes_non_empty_collection() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp, Format::Yaml);
    store.save("a", &doc(json!({"n": "1"}))).unwrap();
    store.save("b", &doc(json!({"n": "2"}))).unwrap();

    store.delete_collection("collection", true).unwrap();
    temp.child("collection").assert(predicate::path::missing());
}

#[test]
fn keys_cannot_escape_the_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.child("root");
    let mut store = Store::new(LocalFilesystem::new(root.path()).unwrap());
    store.set_collection("../outside");

    store.save("data", &doc(json!({"n": 1}))).unwrap();

    temp.child("outside").assert(predicate::path::missing());
    root.child("outside/data.json").assert(predicate::path::is_file());
}

#[test]
fn store_opened_from_config_file() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.child("suitcase.toml");
    config_file
        .write_str(&format!(
            "root = {:?}\nformat = \"yaml\"\ncollection = \"settings\"\n",
            temp.child("data").path().display().to_string()
        ))
        .unwrap();

    let config = StoreConfig::load(config_file.path()).unwrap();
    let store = Store::from_config(&config).unwrap();
    store.save("theme", &doc(json!({"dark": true}))).unwrap();

    temp.child("data/settings/theme.yml")
        .assert("dark: true\n");
    assert_eq!(store.read("theme").unwrap(), doc(json!({"dark": true})));
}

#[test]
fn filesystem_listing_strips_extensions() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp, Format::Xml);
    store.save("report", &doc(json!({"q": 1}))).unwrap();

    let entries = store
        .filesystem()
        .list_contents(&NormalizedPath::new("collection"))
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].filename, "report");
    assert_eq!(entries[0].path.as_str(), "collection/report.xml");
}
