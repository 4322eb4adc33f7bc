//! Serialization formats for the Suitcase document store
//!
//! Each [`Format`] maps between a [`serde_json::Value`] and the encoded
//! text stored on disk, and names the file extension for that encoding.

pub mod error;
pub mod format;
pub mod handlers;

pub use error::{Error, Result};
pub use format::{Format, FormatHandler};
pub use handlers::{CsvHandler, JsonHandler, XmlHandler, YamlHandler};
