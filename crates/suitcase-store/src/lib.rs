//! Keyed document store
//!
//! A [`Store`] maps `(collection, key)` pairs onto files named
//! `{collection}/{key}{extension}`, encodes documents with a chosen
//! [`Format`], and reports every failure as a typed [`Error`].
//!
//! ```no_run
//! use serde_json::json;
//! use suitcase_store::{Format, MemoryFilesystem, Store};
//!
//! # fn main() -> suitcase_store::Result<()> {
//! let mut store = Store::with_format(MemoryFilesystem::new(), Format::Yaml);
//! store.set_collection("users");
//!
//! let alice = json!({"name": "Alice"}).as_object().cloned().unwrap_or_default();
//! store.save("alice", &alice)?.save("bob", &alice)?;
//! assert_eq!(store.read("alice")?, alice);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use builder::StoreBuilder;
pub use config::StoreConfig;
pub use error::{Error, ErrorKind, Result};
pub use store::{Document, Store};

pub use suitcase_format::Format;
pub use suitcase_fs::{ContentEntry, Filesystem, LocalFilesystem, MemoryFilesystem, NormalizedPath};
