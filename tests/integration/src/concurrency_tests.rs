//! Stores shared across threads over one directory

use std::sync::Arc;
use std::thread;

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use suitcase_store::{Document, Format, LocalFilesystem, Store};

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

#[test]
fn one_store_per_thread_over_a_shared_filesystem() {
    let temp = TempDir::new().unwrap();
    let fs = Arc::new(LocalFilesystem::new(temp.path()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let fs = Arc::clone(&fs);
            thread::spawn(move || {
                let mut store = Store::with_format(fs, Format::Yaml);
                store.set_collection(format!("worker-{worker}"));
                for i in 0..10 {
                    store
                        .save(&format!("item-{i}"), &doc(json!({"worker": worker, "i": i})))
                        .unwrap();
                }
                store.read_all().unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
    for worker in 0..4 {
        temp.child(format!("worker-{worker}/item-9.yml"))
            .assert(predicate::path::is_file());
    }
}

#[test]
fn a_store_can_be_read_from_many_threads() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::new(LocalFilesystem::new(temp.path()).unwrap());
    store.set_collection("shared");
    let expected = doc(json!({"foo": {"bar": "baz"}}));
    store.save("data", &expected).unwrap();

    let store = Arc::new(store);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.read("data").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn concurrent_updates_leave_a_complete_document() {
    let temp = TempDir::new().unwrap();
    let mut store = Store::new(LocalFilesystem::new(temp.path()).unwrap());
    store.set_collection("shared");
    store.save("counter", &doc(json!({"writer": -1}))).unwrap();

    let store = Arc::new(store);
    let handles: Vec<_> = (0..4)
        .map(|writer| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..5 {
                    store
                        .save("counter", &doc(json!({"writer": writer})))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let last = store.read("counter").unwrap();
    let writer = last["writer"].as_i64().unwrap();
    assert!((0..4).contains(&writer));
}
