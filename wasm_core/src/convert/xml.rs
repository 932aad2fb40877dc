// JSON ↔ XML converter. Object keys map to tags, arrays to repeated tags, leaves to text.
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::convert::helpers::{xml_escape, xml_tag_name};
use crate::convert::json_utils::{encode_json, parse_json, scalar_text};

const TEXT_KEY: &str = "#text";

/// Converts JSON into indented XML.
///
/// Each key of the top-level object becomes a top-level element, so a single-key
/// object yields a proper document. Any other top-level value is wrapped in `<root>`.
///
/// # Example
/// ```
/// use devtoolkit_core::convert::xml::json_to_xml;
/// let xml = json_to_xml(r#"{"person":{"name":"Ada"}}"#)?;
/// assert_eq!(xml, "<person>\n  <name>Ada</name>\n</person>\n");
/// # Ok::<(), String>(())
/// ```
pub fn json_to_xml(input: &str) -> Result<String, String> {
    let value = parse_json(input)?;
    Ok(value_to_xml(&value))
}

/// Renders an already-parsed JSON value as XML.
pub fn value_to_xml(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                build_xml(&mut out, key, child, 0);
            }
        }
        other => build_xml(&mut out, "root", other, 0),
    }
    out
}

fn build_xml(buf: &mut String, key: &str, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Array(items) => {
            for item in items {
                build_xml(buf, key, item, depth);
            }
        }
        Value::Object(map) => {
            let tag = xml_tag_name(key);
            buf.push_str(&format!("{indent}<{tag}>\n"));
            for (child_key, child) in map {
                build_xml(buf, child_key, child, depth + 1);
            }
            buf.push_str(&format!("{indent}</{tag}>\n"));
        }
        leaf => {
            let tag = xml_tag_name(key);
            buf.push_str(&format!(
                "{indent}<{tag}>{}</{tag}>\n",
                xml_escape(&scalar_text(leaf))
            ));
        }
    }
}

/// Parses XML into pretty-printed JSON, grouping repeated tags into arrays.
///
/// # Example
/// ```
/// use devtoolkit_core::convert::xml::xml_to_json;
/// let json = xml_to_json("<a><b>1</b><b>2</b></a>")?;
/// assert!(json.contains("\"b\": [\n      \"1\",\n      \"2\"\n    ]"));
/// # Ok::<(), String>(())
/// ```
pub fn xml_to_json(input: &str) -> Result<String, String> {
    let value = parse_xml(input)?;
    encode_json(&value, false)
}

/// Parses XML into a JSON value keyed by the top-level element name(s).
pub fn parse_xml(input: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(input.trim());
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut top_level: Vec<XmlElement> = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                stack.push(XmlElement::from_start(&tag)?);
            }
            Ok(Event::Empty(tag)) => {
                let node = XmlElement::from_start(&tag)?;
                attach(&mut stack, &mut top_level, node);
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                attach(&mut stack, &mut top_level, node);
            }
            Ok(Event::Text(text)) => {
                let content = text.unescape().map_err(|err| err.to_string())?;
                push_text(&mut stack, &content)?;
            }
            Ok(Event::CData(data)) => {
                let raw = data.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&raw))?;
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.to_string()),
            _ => {}
        }
        buf.clear();
    }
    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    if top_level.is_empty() {
        return Err("no root element".into());
    }
    Ok(Value::Object(group_children(Map::new(), &top_level)))
}

fn attach(stack: &mut [XmlElement], top_level: &mut Vec<XmlElement>, node: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}

/// Text is kept raw until the element closes; see [`XmlElement::text`].
fn push_text(stack: &mut [XmlElement], content: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(current) => {
            current.text_parts.push(content.to_string());
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err("text outside of the root element".into()),
    }
}

fn element_to_value(el: &XmlElement) -> Value {
    if el.children.is_empty() && el.attributes.is_empty() {
        return Value::String(el.text());
    }
    let mut obj = Map::new();
    for (key, value) in &el.attributes {
        obj.insert(key.clone(), Value::String(value.clone()));
    }
    let mut obj = group_children(obj, &el.children);
    let text = el.text();
    if !text.is_empty() {
        obj.insert(TEXT_KEY.to_string(), Value::String(text));
    }
    Value::Object(obj)
}

fn group_children(mut obj: Map<String, Value>, children: &[XmlElement]) -> Map<String, Value> {
    for child in children {
        let value = element_to_value(child);
        match obj.get_mut(&child.name) {
            None => {
                obj.insert(child.name.clone(), value);
            }
            Some(Value::Array(arr)) => arr.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
    obj
}

#[derive(Debug, Clone)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text_parts: Vec<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_start(tag: &BytesStart<'_>) -> Result<Self, String> {
        let name = String::from_utf8_lossy(tag.name().as_ref()).trim().to_string();
        let mut attributes = Vec::new();
        for attr in tag.attributes() {
            let attr = attr.map_err(|err| err.to_string())?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value().map_err(|err| err.to_string())?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Self {
            name,
            attributes,
            text_parts: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Leaf text is returned verbatim (whitespace-only counts as empty). With child
    /// elements present, each text run is trimmed and the runs joined by a space.
    fn text(&self) -> String {
        if self.children.is_empty() {
            let raw = self.text_parts.concat();
            if raw.trim().is_empty() {
                return String::new();
            }
            return raw;
        }
        self.text_parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn arrays_become_repeated_tags() {
        let xml = json_to_xml(r#"{"root":{"person":[{"name":"Peter"},{"name":"Mary"}]}}"#)
            .unwrap();
        assert_eq!(
            xml,
            "<root>\n  <person>\n    <name>Peter</name>\n  </person>\n  <person>\n    <name>Mary</name>\n  </person>\n</root>\n"
        );
    }

    #[test]
    fn leaves_are_escaped_and_stringified() {
        let xml = json_to_xml(r#"{"a":"<b> & 'c' \"d\"","n":26,"t":true,"z":null}"#).unwrap();
        assert!(xml.contains("<a>&lt;b&gt; &amp; &apos;c&apos; &quot;d&quot;</a>"));
        assert!(xml.contains("<n>26</n>"));
        assert!(xml.contains("<t>true</t>"));
        assert!(xml.contains("<z>null</z>"));
    }

    #[test]
    fn non_object_top_level_is_wrapped() {
        assert_eq!(json_to_xml("[1,2]").unwrap(), "<root>1</root>\n<root>2</root>\n");
        assert_eq!(json_to_xml("\"hi\"").unwrap(), "<root>hi</root>\n");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(json_to_xml("{not json").is_err());
    }

    #[test]
    fn attributes_are_flattened() {
        let value = parse_xml(r#"<user id="7" role="admin"><name>Ada</name></user>"#).unwrap();
        assert_eq!(value, json!({"user": {"id": "7", "role": "admin", "name": "Ada"}}));
    }

    #[test]
    fn entities_and_cdata_are_text() {
        let value = parse_xml("<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>").unwrap();
        assert_eq!(value, json!({"a": {"b": "x & y", "c": "<raw>"}}));
    }

    #[test]
    fn mixed_content_keeps_text() {
        let value = parse_xml("<p>hello <b>world</b></p>").unwrap();
        assert_eq!(value, json!({"p": {"b": "world", "#text": "hello"}}));
    }

    #[test]
    fn empty_elements_become_empty_strings() {
        let value = parse_xml(r#"<?xml version="1.0"?><a><b/><c></c></a>"#).unwrap();
        assert_eq!(value, json!({"a": {"b": "", "c": ""}}));
    }

    #[test]
    fn malformed_xml_is_rejected() {
        assert!(parse_xml("<a><b></a>").is_err());
        assert!(parse_xml("<a>").is_err());
        assert!(parse_xml("just text").is_err());
        assert!(parse_xml("").is_err());
    }

    #[test]
    fn json_round_trips_through_xml() {
        let original = json!({
            "root": {
                "person": [
                    {"name": "Peter Parker", "city": "New York"},
                    {"name": "Mary Jane", "city": "Los Angeles"}
                ],
                "note": "a < b & c"
            }
        });
        let xml = value_to_xml(&original);
        assert_eq!(parse_xml(&xml).unwrap(), original);
    }

    #[test]
    fn leaf_whitespace_survives_round_trip() {
        let original = json!({"s": "  padded  ", "t": {"u": "line one\nline two "}});
        let xml = value_to_xml(&original);
        assert_eq!(parse_xml(&xml).unwrap(), original);
    }

    #[test]
    fn indentation_between_children_is_ignored() {
        let value = parse_xml("<a>\n  <b> x </b>\n  <c>\n  </c>\n</a>\n").unwrap();
        assert_eq!(value, json!({"a": {"b": " x ", "c": ""}}));
    }

    #[test]
    fn multi_key_objects_round_trip_as_fragments() {
        let original = json!({"a": "1", "b": {"c": "2"}});
        let xml = value_to_xml(&original);
        assert_eq!(parse_xml(&xml).unwrap(), original);
    }
}
