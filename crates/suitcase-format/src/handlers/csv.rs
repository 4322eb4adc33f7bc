//! CSV format handler
//!
//! A document is one header row of dot-notated keys and one data row:
//!
//! ```text
//! foo.bar
//! baz
//! ```
//!
//! Sequences flatten by index (`tags.0`, `tags.1`) and are restored on
//! decode. Every decoded leaf is a string, so encoding only accepts values
//! that decode back unchanged: string leaves inside non-empty containers.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

const SEPARATOR: char = '.';

/// Handler for CSV documents
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvHandler;

impl CsvHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for CsvHandler {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn extension(&self) -> &'static str {
        ".csv"
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let Value::Object(map) = value else {
            return Err(encode_error("only mappings can be written as CSV"));
        };

        let mut columns = Vec::new();
        flatten_map(None, map, &mut columns)?;
        if columns.is_empty() {
            return Ok(String::new());
        }

        let (headers, values): (Vec<String>, Vec<String>) = columns.into_iter().unzip();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&headers).map_err(encode_error)?;
        writer.write_record(&values).map_err(encode_error)?;
        let bytes = writer.into_inner().map_err(encode_error)?;
        String::from_utf8(bytes).map_err(encode_error)
    }

    fn decode(&self, source: &str) -> Result<Value> {
        if source.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source.as_bytes());
        let headers = reader.headers().map_err(decode_error)?.clone();

        let mut rows = reader.records();
        let row = match rows.next() {
            Some(row) => row.map_err(decode_error)?,
            None => return Err(decode_error("missing data row")),
        };
        if rows.next().is_some() {
            return Err(decode_error("expected a single data row"));
        }

        let mut root = Map::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            insert_path(&mut root, header, field)?;
        }

        Ok(Value::Object(
            root.into_iter()
                .map(|(k, v)| (k, restore_sequences(v)))
                .collect(),
        ))
    }
}

fn encode_error(cause: impl ToString) -> Error {
    Error::encode(Format::Csv, cause)
}

fn decode_error(cause: impl ToString) -> Error {
    Error::decode(Format::Csv, cause)
}

fn flatten_map(
    prefix: Option<&str>,
    map: &Map<String, Value>,
    out: &mut Vec<(String, String)>,
) -> Result<()> {
    for (key, value) in map {
        if key.is_empty() || key.contains(SEPARATOR) {
            return Err(encode_error(format!(
                "key '{key}' cannot be represented in dot notation"
            )));
        }
        let path = match prefix {
            Some(prefix) => format!("{prefix}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        flatten_value(path, value, out)?;
    }
    Ok(())
}

fn flatten_value(path: String, value: &Value, out: &mut Vec<(String, String)>) -> Result<()> {
    match value {
        Value::String(s) => out.push((path, s.clone())),
        Value::Object(map) if map.is_empty() => {
            return Err(encode_error(format!("empty mapping at '{path}'")));
        }
        Value::Object(map) if is_index_keyed(map) => {
            return Err(encode_error(format!(
                "mapping at '{path}' is keyed like a sequence"
            )));
        }
        Value::Object(map) => flatten_map(Some(&path), map, out)?,
        Value::Array(items) if items.is_empty() => {
            return Err(encode_error(format!("empty sequence at '{path}'")));
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_value(format!("{path}{SEPARATOR}{index}"), item, out)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            return Err(encode_error(format!(
                "only string values can be written as CSV, found {} at '{path}'",
                scalar_kind(value)
            )));
        }
    }
    Ok(())
}

fn scalar_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        _ => "a container",
    }
}

/// Keys exactly `0..n`, which decode would turn into a sequence.
fn is_index_keyed(map: &Map<String, Value>) -> bool {
    !map.is_empty() && (0..map.len()).all(|i| map.contains_key(&i.to_string()))
}

fn insert_path(root: &mut Map<String, Value>, path: &str, field: &str) -> Result<()> {
    let mut segments = path.split(SEPARATOR).peekable();
    let mut current = root;

    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            return Err(decode_error(format!("empty segment in column '{path}'")));
        }
        if segments.peek().is_none() {
            if current.contains_key(segment) {
                return Err(decode_error(format!("duplicate column '{path}'")));
            }
            current.insert(segment.to_string(), Value::String(field.to_string()));
            return Ok(());
        }
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| decode_error(format!("column '{path}' conflicts with a value")))?;
    }

    Ok(())
}

/// Turn maps keyed exactly `0..n` back into sequences.
fn restore_sequences(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if is_index_keyed(&map) {
                Value::Array(
                    (0..map.len())
                        .filter_map(|i| map.remove(&i.to_string()))
                        .map(restore_sequences)
                        .collect(),
                )
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(k, v)| (k, restore_sequences(v)))
                        .collect(),
                )
            }
        }
        other => other,
    }
}
