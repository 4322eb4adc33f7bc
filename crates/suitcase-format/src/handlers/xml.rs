//! XML format handler using quick-xml
//!
//! Documents are written under a `<result>` root. Map keys become child
//! elements, strings become text, and every other node carries a `type`
//! attribute so decoding restores the exact value:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?><result><foo><bar>baz</bar></foo></result>
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

const ROOT: &str = "result";
const ITEM: &str = "item";
const ENTRY: &str = "entry";
const TYPE_ATTR: &str = "type";
const KEY_ATTR: &str = "key";

/// Handler for XML documents
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlHandler;

impl XmlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for XmlHandler {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn extension(&self) -> &'static str {
        ".xml"
    }

    fn encode(&self, value: &Value) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(encode_error)?;
        write_node(&mut writer, ROOT, None, value)?;
        String::from_utf8(writer.into_inner()).map_err(encode_error)
    }

    fn decode(&self, source: &str) -> Result<Value> {
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<Value> = None;

        loop {
            let event = reader.read_event().map_err(decode_error)?;
            match event {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(decode_error("content after the root element"));
                    }
                    stack.push(Frame::open(&start)?);
                }
                Event::Empty(start) => {
                    if root.is_some() {
                        return Err(decode_error("content after the root element"));
                    }
                    let frame = Frame::open(&start)?;
                    attach(&mut stack, &mut root, frame)?;
                }
                Event::End(_) => {
                    let frame = stack
                        .pop()
                        .ok_or_else(|| decode_error("unbalanced closing tag"))?;
                    attach(&mut stack, &mut root, frame)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(decode_error)?;
                    match stack.last_mut() {
                        Some(frame) => frame.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(decode_error("text outside the root element")),
                    }
                }
                Event::CData(data) => {
                    let data = std::str::from_utf8(&data).map_err(decode_error)?;
                    match stack.last_mut() {
                        Some(frame) => frame.text.push_str(data),
                        None => return Err(decode_error("CDATA outside the root element")),
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(decode_error("unexpected end of document"));
        }
        root.ok_or_else(|| decode_error("missing root element"))
    }
}

fn encode_error(cause: impl ToString) -> Error {
    Error::encode(Format::Xml, cause)
}

fn decode_error(cause: impl ToString) -> Error {
    Error::decode(Format::Xml, cause)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    key: Option<&str>,
    value: &Value,
) -> Result<()> {
    let mut start = BytesStart::new(tag);
    if let Some(key) = key {
        check_chars(key)?;
        start.push_attribute((KEY_ATTR, key));
    }
    if let Some(kind) = type_of(value) {
        start.push_attribute((TYPE_ATTR, kind));
    }

    let text = match value {
        Value::Array(items) => {
            writer
                .write_event(Event::Start(start.borrow()))
                .map_err(encode_error)?;
            for item in items {
                write_node(writer, ITEM, None, item)?;
            }
            return writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(encode_error);
        }
        Value::Object(map) if !map.is_empty() => {
            writer
                .write_event(Event::Start(start.borrow()))
                .map_err(encode_error)?;
            for (child_key, child) in map {
                if is_xml_name(child_key) {
                    write_node(writer, child_key, None, child)?;
                } else {
                    write_node(writer, ENTRY, Some(child_key), child)?;
                }
            }
            return writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(encode_error);
        }
        Value::Null | Value::Object(_) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => {
            check_chars(s)?;
            Some(s.clone())
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
    };

    match text {
        None => writer
            .write_event(Event::Empty(start))
            .map_err(encode_error),
        Some(text) => {
            writer
                .write_event(Event::Start(start.borrow()))
                .map_err(encode_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(encode_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(tag)))
                .map_err(encode_error)
        }
    }
}

/// The `type` attribute for a node; strings and non-empty maps need none.
fn type_of(value: &Value) -> Option<&'static str> {
    match value {
        Value::Null => Some("null"),
        Value::Bool(_) => Some("bool"),
        Value::Number(n) if n.is_f64() => Some("float"),
        Value::Number(_) => Some("int"),
        Value::String(_) => None,
        Value::Array(_) => Some("array"),
        Value::Object(map) if map.is_empty() => Some("map"),
        Value::Object(_) => None,
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.to_ascii_lowercase().starts_with("xml")
}

/// Rejects characters XML 1.0 cannot carry, even escaped.
fn check_chars(text: &str) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        Some(c) => Err(encode_error(format!(
            "character U+{:04X} cannot be represented in XML",
            c as u32
        ))),
        None => Ok(()),
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}

/// An element being decoded.
struct Frame {
    name: String,
    key: Option<String>,
    kind: Option<String>,
    children: Vec<(String, Value)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(decode_error)?
            .to_string();
        let mut frame = Self {
            name,
            key: None,
            kind: None,
            children: Vec::new(),
            text: String::new(),
        };
        for attr in start.attributes() {
            let attr = attr.map_err(decode_error)?;
            let value = attr.unescape_value().map_err(decode_error)?.into_owned();
            match attr.key.as_ref() {
                b"type" => frame.kind = Some(value),
                b"key" => frame.key = Some(value),
                _ => {}
            }
        }
        Ok(frame)
    }

    fn into_entry(self) -> Result<(String, Value)> {
        let Frame {
            name,
            key,
            kind,
            children,
            text,
        } = self;

        let value = match kind.as_deref() {
            Some("null") => Value::Null,
            Some("bool") => match text.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => return Err(decode_error(format!("invalid boolean '{other}'"))),
            },
            Some("int") => parse_int(text.trim())?,
            Some("float") => {
                let parsed: f64 = text.trim().parse().map_err(decode_error)?;
                Number::from_f64(parsed)
                    .map(Value::Number)
                    .ok_or_else(|| decode_error(format!("non-finite float '{}'", text.trim())))?
            }
            Some("array") => Value::Array(children.into_iter().map(|(_, v)| v).collect()),
            Some("map") => Value::Object(children.into_iter().collect()),
            Some(other) => return Err(decode_error(format!("unknown node type '{other}'"))),
            None if children.is_empty() => Value::String(text),
            None => {
                if !text.trim().is_empty() {
                    return Err(decode_error(format!("mixed content in <{name}>")));
                }
                Value::Object(children.into_iter().collect::<Map<String, Value>>())
            }
        };

        Ok((key.unwrap_or(name), value))
    }
}

fn parse_int(text: &str) -> Result<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::from(n));
    }
    text.parse::<u64>()
        .map(Value::from)
        .map_err(|_| decode_error(format!("invalid integer '{text}'")))
}

/// Close `frame` and hand its value to the parent, or make it the root.
fn attach(stack: &mut [Frame], root: &mut Option<Value>, frame: Frame) -> Result<()> {
    let entry = frame.into_entry()?;
    match stack.last_mut() {
        Some(parent) => parent.children.push(entry),
        None => *root = Some(entry.1),
    }
    Ok(())
}
