//! Recording filesystem double for store tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{Value, json};
use suitcase_fs::{ContentEntry, Error, Filesystem, NormalizedPath, Result};
use suitcase_store::Document;

/// A filesystem call as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Has(String),
    Write(String, String),
    Update(String, String),
    Read(String),
    Delete(String),
    DeleteDir(String),
    ListContents(String),
}

/// A scripted answer for one call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Value(T),
    FileExists,
    FileNotFound,
}

impl<T> Reply<T> {
    fn resolve(self, path: &NormalizedPath) -> Result<T> {
        match self {
            Reply::Value(value) => Ok(value),
            Reply::FileExists => Err(Error::file_exists(path)),
            Reply::FileNotFound => Err(Error::file_not_found(path)),
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    has: VecDeque<Reply<bool>>,
    write: VecDeque<Reply<bool>>,
    update: VecDeque<Reply<bool>>,
    read: VecDeque<Reply<Option<Vec<u8>>>>,
    delete: VecDeque<Reply<bool>>,
    delete_dir: VecDeque<Reply<bool>>,
    list_contents: VecDeque<Reply<Vec<ContentEntry>>>,
}

/// Filesystem that answers from a script and records every call.
///
/// Calls without a scripted reply panic, so a test fails loudly when the
/// store touches the filesystem in a way it did not expect.
#[derive(Debug, Default)]
pub struct StubFilesystem {
    script: Mutex<Script>,
    calls: Mutex<Vec<Call>>,
}

impl StubFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn on_has(&self, reply: Reply<bool>) -> &Self {
        self.script.lock().unwrap().has.push_back(reply);
        self
    }

    pub fn on_write(&self, reply: Reply<bool>) -> &Self {
        self.script.lock().unwrap().write.push_back(reply);
        self
    }

    pub fn on_update(&self, reply: Reply<bool>) -> &Self {
        self.script.lock().unwrap().update.push_back(reply);
        self
    }

    pub fn on_read(&self, reply: Reply<Option<Vec<u8>>>) -> &Self {
        self.script.lock().unwrap().read.push_back(reply);
        self
    }

    pub fn on_delete(&self, reply: Reply<bool>) -> &Self {
        self.script.lock().unwrap().delete.push_back(reply);
        self
    }

    pub fn on_delete_dir(&self, reply: Reply<bool>) -> &Self {
        self.script.lock().unwrap().delete_dir.push_back(reply);
        self
    }

    pub fn on_list_contents(&self, reply: Reply<Vec<ContentEntry>>) -> &Self {
        self.script.lock().unwrap().list_contents.push_back(reply);
        self
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next<T>(queue: &mut VecDeque<Reply<T>>, call: &str, path: &NormalizedPath) -> Result<T> {
    queue
        .pop_front()
        .unwrap_or_else(|| panic!("unexpected {call}({path})"))
        .resolve(path)
}

fn text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

impl Filesystem for StubFilesystem {
    fn has(&self, path: &NormalizedPath) -> Result<bool> {
        self.record(Call::Has(path.to_string()));
        next(&mut self.script.lock().unwrap().has, "has", path)
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        self.record(Call::Write(path.to_string(), text(data)));
        next(&mut self.script.lock().unwrap().write, "write", path)
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<bool> {
        self.record(Call::Update(path.to_string(), text(data)));
        next(&mut self.script.lock().unwrap().update, "update", path)
    }

    fn read(&self, path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
        self.record(Call::Read(path.to_string()));
        next(&mut self.script.lock().unwrap().read, "read", path)
    }

    fn delete(&self, path: &NormalizedPath) -> Result<bool> {
        self.record(Call::Delete(path.to_string()));
        next(&mut self.script.lock().unwrap().delete, "delete", path)
    }

    fn delete_dir(&self, path: &NormalizedPath) -> Result<bool> {
        self.record(Call::DeleteDir(path.to_string()));
        next(&mut self.script.lock().unwrap().delete_dir, "delete_dir", path)
    }

    fn list_contents(&self, path: &NormalizedPath) -> Result<Vec<ContentEntry>> {
        self.record(Call::ListContents(path.to_string()));
        next(
            &mut self.script.lock().unwrap().list_contents,
            "list_contents",
            path,
        )
    }
}

/// Listing entries for `collection` with the given item keys and extension.
pub fn entries(collection: &str, keys: &[&str], extension: &str) -> Vec<ContentEntry> {
    keys.iter()
        .map(|key| {
            ContentEntry::from_path(NormalizedPath::new(format!("{collection}/{key}{extension}")))
        })
        .collect()
}

/// The `{"foo": {"bar": "baz"}}` document used throughout the store tests.
pub fn sample() -> Document {
    document(json!({"foo": {"bar": "baz"}}))
}

pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("not a mapping: {other}"),
    }
}

/// Pretty JSON for [`sample`], as the store writes it.
pub const SAMPLE_JSON: &str = "{\n    \"foo\": {\n        \"bar\": \"baz\"\n    }\n}";
