//! The document store

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use suitcase_format::Format;
use suitcase_fs::{Filesystem, LocalFilesystem, NormalizedPath};

use crate::builder::StoreBuilder;
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// One stored item: a mapping from string keys to structured values.
pub type Document = Map<String, Value>;

/// A keyed collection of documents persisted one file per item.
///
/// Items live at `{collection}/{key}{extension}`. There is no index; bulk
/// operations enumerate the collection directory. The store holds no lock,
/// so sharing one instance across threads that also call
/// [`Store::set_collection`] is unsupported.
#[derive(Debug)]
pub struct Store<F> {
    filesystem: F,
    format: Format,
    collection: Option<String>,
}

impl<F: Filesystem> Store<F> {
    /// Create a JSON store over `filesystem` with no collection selected.
    pub fn new(filesystem: F) -> Self {
        Self::with_format(filesystem, Format::default())
    }

    /// Create a store using `format` for every item.
    pub fn with_format(filesystem: F, format: Format) -> Self {
        Self {
            filesystem,
            format,
            collection: None,
        }
    }

    /// Start a fluent builder over `filesystem`.
    pub fn builder(filesystem: F) -> StoreBuilder<F> {
        StoreBuilder::new(filesystem)
    }

    pub(crate) fn from_parts(filesystem: F, format: Format, collection: Option<String>) -> Self {
        Self {
            filesystem,
            format,
            collection,
        }
    }

    /// Select the collection used by item operations.
    pub fn set_collection(&mut self, collection: impl Into<String>) -> &mut Self {
        self.collection = Some(collection.into());
        self
    }

    /// The selected collection, if any.
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref().filter(|c| !c.is_empty())
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    /// Path of the file holding `key` in the selected collection.
    ///
    /// The result is always `{collection}/{key}{extension}`; keys that would
    /// be rewritten by path normalisation are rejected with
    /// [`Error::InvalidKey`].
    pub fn file_path(&self, key: &str) -> Result<NormalizedPath> {
        let collection = self.require_collection()?;
        check_key(key)?;
        Ok(NormalizedPath::new(collection).join(&format!("{key}{}", self.format.extension())))
    }

    /// Whether an item exists under `key`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        let path = self.file_path(key)?;
        self.filesystem
            .has(&path)
            .map_err(|e| Error::read("Unable to check for data.", Some(e.to_string())))
    }

    /// Create or overwrite the item stored under `key`.
    pub fn save(&self, key: &str, document: &Document) -> Result<&Self> {
        let path = self.file_path(key)?;
        let encoded = self.format.encode(&Value::Object(document.clone()))?;

        let exists = self
            .filesystem
            .has(&path)
            .map_err(|e| Error::save("Unable to save data.", Some(e.to_string())))?;

        tracing::debug!(%path, exists, bytes = encoded.len(), "Saving item");
        if exists {
            self.update(&path, encoded.as_bytes())?;
        } else {
            self.write(&path, encoded.as_bytes())?;
        }

        Ok(self)
    }

    fn write(&self, path: &NormalizedPath, data: &[u8]) -> Result<()> {
        match self.filesystem.write(path, data) {
            Ok(true) => Ok(()),
            Ok(false) => Err(failed(Error::save("Unable to write data.", None))),
            Err(e) if e.is_file_exists() => Err(failed(Error::save(
                "Unable to write data. File already exists.",
                Some(e.to_string()),
            ))),
            Err(e) => Err(failed(Error::save("Unable to write data.", Some(e.to_string())))),
        }
    }

    fn update(&self, path: &NormalizedPath, data: &[u8]) -> Result<()> {
        match self.filesystem.update(path, data) {
            Ok(true) => Ok(()),
            Ok(false) => Err(failed(Error::save("Unable to update data.", None))),
            Err(e) if e.is_file_not_found() => Err(failed(Error::save(
                "Unable to update data. File not found.",
                Some(e.to_string()),
            ))),
            Err(e) => Err(failed(Error::save("Unable to update data.", Some(e.to_string())))),
        }
    }

    /// Load the item stored under `key`.
    pub fn read(&self, key: &str) -> Result<Document> {
        let path = self.file_path(key)?;
        tracing::debug!(%path, "Reading item");

        let bytes = match self.filesystem.read(&path) {
            Ok(Some(bytes)) if !bytes.is_empty() => bytes,
            Ok(_) => return Err(failed(Error::read("Unable to read data.", None))),
            Err(e) if e.is_file_not_found() => {
                return Err(failed(Error::read(
                    "Unable to read data. File not found.",
                    Some(e.to_string()),
                )));
            }
            Err(e) => return Err(failed(Error::read("Unable to read data.", Some(e.to_string())))),
        };

        let encoded = String::from_utf8(bytes).map_err(|e| {
            failed(Error::read(
                "Unable to read data. Content is not valid UTF-8.",
                Some(e.to_string()),
            ))
        })?;

        match self.format.decode(&encoded)? {
            Value::Object(document) => Ok(document),
            other => Err(suitcase_format::Error::decode(
                self.format,
                format!("expected a mapping, found {}", value_kind(&other)),
            )
            .into()),
        }
    }

    /// Load every item in the selected collection, keyed by item key.
    ///
    /// Stops at the first item that fails to load and returns that error.
    pub fn read_all(&self) -> Result<BTreeMap<String, Document>> {
        let collection = NormalizedPath::new(self.require_collection()?);
        let entries = self
            .filesystem
            .list_contents(&collection)
            .map_err(|e| failed(Error::read("Unable to list collection.", Some(e.to_string()))))?;
        tracing::debug!(%collection, count = entries.len(), "Reading all items");

        let mut documents = BTreeMap::new();
        for entry in entries {
            let document = self.read(&entry.filename)?;
            documents.insert(entry.filename, document);
        }
        Ok(documents)
    }

    /// Delete the item stored under `key`.
    pub fn delete(&self, key: &str) -> Result<&Self> {
        let path = self.file_path(key)?;
        tracing::debug!(%path, "Deleting item");

        match self.filesystem.delete(&path) {
            Ok(true) => Ok(self),
            Ok(false) => Err(failed(Error::delete("Unable to delete data.", None))),
            Err(e) if e.is_file_not_found() => Err(failed(Error::delete(
                "Unable to delete data. File not found.",
                Some(e.to_string()),
            ))),
            Err(e) => Err(failed(Error::delete("Unable to delete data.", Some(e.to_string())))),
        }
    }

    /// Delete every item in the selected collection.
    ///
    /// Stops at the first failure; items deleted before it stay deleted.
    pub fn delete_all(&self) -> Result<&Self> {
        let collection = NormalizedPath::new(self.require_collection()?);
        let entries = self.filesystem.list_contents(&collection).map_err(|e| {
            failed(Error::delete("Unable to list collection.", Some(e.to_string())))
        })?;
        tracing::debug!(%collection, count = entries.len(), "Deleting all items");

        for entry in entries {
            self.delete(&entry.filename)?;
        }
        Ok(self)
    }

    /// Delete a collection directory.
    ///
    /// With `empty` set, everything in the collection is removed. Otherwise
    /// the collection must already be empty and nothing is deleted when it
    /// is not. The emptiness check and the delete are separate filesystem
    /// calls, so a concurrent writer can slip in between them.
    pub fn delete_collection(&self, collection: &str, empty: bool) -> Result<&Self> {
        let path = NormalizedPath::new(collection);

        if !empty {
            let entries = self.filesystem.list_contents(&path).map_err(|e| {
                failed(Error::delete("Unable to delete collection.", Some(e.to_string())))
            })?;
            if !entries.is_empty() {
                return Err(failed(Error::CollectionNotEmpty {
                    collection: collection.to_string(),
                    entries: entries.len(),
                }));
            }
        }

        tracing::debug!(%path, empty, "Deleting collection");
        match self.filesystem.delete_dir(&path) {
            Ok(true) => Ok(self),
            Ok(false) => Err(failed(Error::delete("Unable to delete collection.", None))),
            Err(e) => Err(failed(Error::delete(
                "Unable to delete collection.",
                Some(e.to_string()),
            ))),
        }
    }

    fn require_collection(&self) -> Result<&str> {
        self.collection().ok_or(Error::CollectionNotSet)
    }
}

impl Store<LocalFilesystem> {
    /// Open a disk-backed store described by `config`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let filesystem = LocalFilesystem::new(&config.root)?;
        let mut builder = StoreBuilder::new(filesystem).format(config.format);
        if let Some(collection) = &config.collection {
            builder = builder.collection(collection.clone());
        }
        Ok(builder.build())
    }
}

/// A key must map to exactly one visible file directly inside the collection.
fn check_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        "key is empty"
    } else if key.contains(['/', '\\']) {
        "key contains a path separator"
    } else if key.starts_with('.') {
        "key starts with '.'"
    } else if key.contains('\0') {
        "key contains a NUL byte"
    } else {
        return Ok(());
    };
    Err(failed(Error::InvalidKey {
        key: key.to_string(),
        reason,
    }))
}

fn failed(error: Error) -> Error {
    tracing::warn!(kind = ?error.kind(), cause = ?error.cause(), "{}", error);
    error
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
