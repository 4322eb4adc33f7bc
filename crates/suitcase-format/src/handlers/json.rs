//! JSON format handler

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

const INDENT: &[u8] = b"    ";

/// Handler for JSON documents
///
/// Output is pretty printed with a four-space indent. Slashes and non-ASCII
/// characters are written as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn extension(&self) -> &'static str {
        ".json"
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        value
            .serialize(&mut serializer)
            .map_err(|e| Error::encode(Format::Json, e))?;
        String::from_utf8(buf).map_err(|e| Error::encode(Format::Json, e))
    }

    fn decode(&self, source: &str) -> Result<Value> {
        serde_json::from_str(source).map_err(|e| Error::decode(Format::Json, e))
    }
}
