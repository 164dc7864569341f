use pomxml::xml::{Event, Reader, Writer};
use pomxml::OrderedProperties;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_properties_unmarshal_keeps_order() -> TestResult {
    let mut reader = Reader::from_str("<properties><a>1</a><b>1</b><c>1</c></properties>");
    assert!(matches!(reader.next_event()?, Some(Event::Start(_))));
    let properties = OrderedProperties::decode(&mut reader)?;
    assert_eq!(
        properties.iter().collect::<Vec<_>>(),
        vec![("a", "1"), ("b", "1"), ("c", "1")]
    );
    assert!(reader.next_event()?.is_none());
    Ok(())
}

#[test]
fn test_properties_marshal_keeps_order() -> TestResult {
    let mut properties = OrderedProperties::new();
    properties.set("a", "1");
    properties.set("b", "1");
    properties.set("c", "1");

    let mut writer = Writer::new();
    properties.encode("properties", &mut writer)?;
    let result = writer.finish()?;
    assert_eq!(result, "<properties><a>1</a><b>1</b><c>1</c></properties>");
    assert!(result.find("<a>") < result.find("<b>"));
    Ok(())
}

#[test]
fn test_reset_key_keeps_position() {
    let mut properties = OrderedProperties::new();
    for key in ["a", "b", "c"] {
        properties.set(key, "1");
    }
    properties.set("a", "2");
    assert_eq!(properties.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(properties.get("a"), Some("2"));
    assert_eq!(properties.get("missing"), None);
}

#[test]
fn test_property_names_with_dots() -> TestResult {
    let properties = pomxml::properties_from_fragment(
        "<project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>\n<maven.compiler.release>17</maven.compiler.release>",
    )?;
    assert_eq!(properties.get("project.build.sourceEncoding"), Some("UTF-8"));
    assert_eq!(properties.to_fragment()?, "<project.build.sourceEncoding>UTF-8</project.build.sourceEncoding><maven.compiler.release>17</maven.compiler.release>");
    Ok(())
}

#[test]
fn test_self_closing_entry_has_empty_value() -> TestResult {
    let properties = OrderedProperties::from_fragment("<skip/><name>x</name>")?;
    assert_eq!(properties.get("skip"), Some(""));
    assert_eq!(properties.len(), 2);
    Ok(())
}

#[test]
fn test_unclosed_entry_is_error() {
    let mut reader = Reader::from_str("<properties><a>1");
    assert!(reader.next_event().is_ok());
    let err = OrderedProperties::decode(&mut reader).err();
    assert!(err.as_ref().is_some_and(pomxml::Error::is_malformed_stream));
}

#[test]
fn test_prefixed_keys_use_local_name() -> TestResult {
    let properties = OrderedProperties::from_fragment("<p:x>1</p:x><y>2</y>")?;
    assert_eq!(properties.get("x"), Some("1"));
    assert_eq!(properties.get("p:x"), None);
    assert_eq!(properties.to_fragment()?, "<x>1</x><y>2</y>");
    Ok(())
}
