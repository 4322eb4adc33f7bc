use rstest::rstest;
use serde_json::json;
use suitcase_format::{Error, Format};

#[rstest]
#[case(Format::Json, ".json")]
#[case(Format::Xml, ".xml")]
#[case(Format::Yaml, ".yml")]
#[case(Format::Csv, ".csv")]
fn test_file_extension(#[case] format: Format, #[case] extension: &str) {
    assert_eq!(format.extension(), extension);
    assert_eq!(Format::from_extension(extension), Some(format));
}

#[rstest]
#[case(Format::Json, r#"{"foo": {"bar":}}"#)]
#[case(Format::Xml, "<result><foo><bar>baz</foo></result>")]
#[case(Format::Yaml, "foo: [bar, baz")]
#[case(Format::Csv, "a,b\n1,2,3")]
fn test_invalid_decode_is_format_error(#[case] format: Format, #[case] source: &str) {
    let err = format.decode(source).unwrap_err();

    assert!(matches!(err, Error::Decode { format: f, .. } if f == format));
    assert_eq!(err.message(), "Error decoding data.");
    assert!(!err.cause().is_empty());
}

#[rstest]
#[case(Format::Json)]
#[case(Format::Xml)]
#[case(Format::Yaml)]
#[case(Format::Csv)]
fn test_nested_document_roundtrip(#[case] format: Format) {
    let document = json!({"foo": {"bar": "baz"}, "tags": ["a", "b"]});

    let encoded = format.encode(&document).unwrap();
    let decoded = format.decode(&encoded).unwrap();

    pretty_assertions::assert_eq!(decoded, document);
}

#[test]
fn test_unknown_format_name() {
    let err = "ini".parse::<Format>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(ref name) if name == "ini"));
}

#[test]
fn test_format_serde_names() {
    assert_eq!(serde_json::to_string(&Format::Yaml).unwrap(), r#""yaml""#);
    let parsed: Format = serde_json::from_str(r#""csv""#).unwrap();
    assert_eq!(parsed, Format::Csv);
}
