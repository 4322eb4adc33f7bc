//! Fluent construction of a [`Store`]

use suitcase_format::Format;
use suitcase_fs::Filesystem;

use crate::store::Store;

/// Builder for [`Store`].
///
/// ```
/// use suitcase_store::{Format, MemoryFilesystem, Store};
///
/// let store = Store::builder(MemoryFilesystem::new())
///     .format(Format::Xml)
///     .collection("invoices")
///     .build();
/// assert_eq!(store.collection(), Some("invoices"));
/// ```
#[derive(Debug)]
pub struct StoreBuilder<F> {
    filesystem: F,
    format: Format,
    collection: Option<String>,
}

impl<F: Filesystem> StoreBuilder<F> {
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            format: Format::default(),
            collection: None,
        }
    }

    /// Encoding used for every item. Defaults to JSON.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Collection selected when the store is built.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn build(self) -> Store<F> {
        Store::from_parts(self.filesystem, self.format, self.collection)
    }
}
