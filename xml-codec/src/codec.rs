//! Tree to XML translation.
//!
//! Encoding walks a [`Value`] tree and emits one element per map key, one
//! sibling run per sequence, and text content per scalar. Decoding is the
//! inverse walk over a parsed [`xmltree::Element`]; repeated sibling tags
//! collapse back into a `Seq`. The codec is deliberately schema-blind so
//! additive provider schema changes pass straight through.

use xmltree::{Element, XMLNode};

use crate::error::CodecError;
use crate::value::{Map, Value};

/// A decoded XML document: the root tag name plus the tree below it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Name of the document's root element, e.g. `apiResponse`.
    pub root_name: String,
    /// The tree below the root element.
    pub root: Value,
}

/// Serialize `body` under a `root_name` element as an XML document.
///
/// `body` must be a non-empty map; every key in the tree must be usable as
/// an XML element name.
pub fn to_xml(root_name: &str, body: &Value) -> Result<String, CodecError> {
    let map = body
        .as_map()
        .ok_or_else(|| CodecError::Encode("document body must be a map of fields".to_owned()))?;
    if map.is_empty() {
        return Err(CodecError::Encode(
            "document body must not be empty".to_owned(),
        ));
    }

    validate_name(root_name)?;
    let mut root = Element::new(root_name);
    for (key, value) in map.iter() {
        append_entry(&mut root, key, value)?;
    }

    let mut buffer = Vec::new();
    root.write(&mut buffer)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parse XML text into a [`Document`].
///
/// Element names become map keys, repeated sibling elements become a `Seq`
/// in document order, and leaf elements become `Text`. Attributes are
/// ignored; the dialect does not use them.
pub fn from_xml(text: &str) -> Result<Document, CodecError> {
    let root = Element::parse(text.as_bytes()).map_err(|e| CodecError::Decode(e.to_string()))?;
    Ok(Document {
        root_name: root.name.clone(),
        root: decode_element(&root),
    })
}

fn append_entry(parent: &mut Element, key: &str, value: &Value) -> Result<(), CodecError> {
    validate_name(key)?;
    match value {
        Value::Seq(items) => {
            for item in items {
                parent
                    .children
                    .push(XMLNode::Element(element_for(key, item)?));
            }
        }
        other => {
            parent
                .children
                .push(XMLNode::Element(element_for(key, other)?));
        }
    }
    Ok(())
}

fn element_for(name: &str, value: &Value) -> Result<Element, CodecError> {
    let mut element = Element::new(name);
    match value {
        Value::Text(text) => {
            if !text.is_empty() {
                element.children.push(XMLNode::Text(text.clone()));
            }
        }
        Value::Map(map) => {
            for (key, child) in map.iter() {
                append_entry(&mut element, key, child)?;
            }
        }
        Value::Seq(_) => {
            return Err(CodecError::Encode(format!(
                "sequence under '{name}' nests another sequence, which has no tag-per-key form"
            )));
        }
    }
    Ok(element)
}

fn decode_element(element: &Element) -> Value {
    let children: Vec<&Element> = element
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(child) => Some(child),
            _ => None,
        })
        .collect();

    if children.is_empty() {
        Value::Text(
            element
                .get_text()
                .map(|text| text.into_owned())
                .unwrap_or_default(),
        )
    } else {
        let mut map = Map::new();
        for child in children {
            map.push_grouped(child.name.clone(), decode_element(child));
        }
        Value::Map(map)
    }
}

fn validate_name(key: &str) -> Result<(), CodecError> {
    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CodecError::Encode(format!(
            "'{key}' is not usable as an XML element name"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn order_body() -> Map {
        let mut order = Map::new();
        order.insert("orderReference", "REF-001");
        order.insert("date", "2014-02-21");

        let mut orders = Map::new();
        orders.insert("order", order);

        let mut body = Map::new();
        body.insert("apiKey", "SECRET");
        body.insert("orders", orders);
        body
    }

    #[test]
    fn encodes_tag_per_key() {
        let xml = to_xml("apiRequest", &Value::Map(order_body())).unwrap();

        assert!(xml.contains("<apiRequest>"));
        assert!(xml.contains("<apiKey>SECRET</apiKey>"));
        assert!(xml.contains("<orderReference>REF-001</orderReference>"));
        assert!(xml.ends_with("</apiRequest>"));
    }

    #[test]
    fn encodes_sequences_as_repeated_siblings() {
        let mut body = Map::new();
        body.insert(
            "item",
            Value::Seq(vec![Value::text("one"), Value::text("two")]),
        );

        let xml = to_xml("apiRequest", &Value::Map(body)).unwrap();
        assert!(xml.contains("<item>one</item><item>two</item>"));
    }

    #[test]
    fn rejects_empty_body() {
        let err = to_xml("apiRequest", &Value::Map(Map::new())).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
    }

    #[test]
    fn rejects_non_map_body() {
        let err = to_xml("apiRequest", &Value::text("scalar")).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
    }

    #[test]
    fn rejects_unusable_keys() {
        for key in ["", "1leading", "has space", "a<b"] {
            let mut body = Map::new();
            body.insert(key, "value");
            let err = to_xml("apiRequest", &Value::Map(body)).unwrap_err();
            assert!(matches!(err, CodecError::Encode(_)), "key {key:?}");
        }
    }

    #[test]
    fn rejects_directly_nested_sequences() {
        let mut body = Map::new();
        body.insert(
            "rows",
            Value::Seq(vec![Value::Seq(vec![Value::text("cell")])]),
        );

        let err = to_xml("apiRequest", &Value::Map(body)).unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
    }

    #[test]
    fn decodes_response_tree() {
        let doc = from_xml(
            "<apiResponse><orders><order><status>Created</status><id>42</id></order></orders></apiResponse>",
        )
        .unwrap();

        assert_eq!(doc.root_name, "apiResponse");
        let order = doc.root.get("orders").and_then(|o| o.get("order")).unwrap();
        assert_eq!(order.get("status"), Some(&Value::text("Created")));
        assert_eq!(order.get("id"), Some(&Value::text("42")));
    }

    #[test]
    fn repeated_siblings_decode_as_sequence() {
        let doc = from_xml(
            "<apiResponse><errors>\
             <error><errorMessage>A</errorMessage></error>\
             <error><errorMessage>B</errorMessage></error>\
             </errors></apiResponse>",
        )
        .unwrap();

        let error = doc.root.get("errors").and_then(|e| e.get("error")).unwrap();
        let items = error.as_seq().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("errorMessage"), Some(&Value::text("A")));
        assert_eq!(items[1].get("errorMessage"), Some(&Value::text("B")));
    }

    #[test]
    fn single_sibling_decodes_as_map() {
        let doc = from_xml(
            "<apiResponse><errors><error><errorMessage>A</errorMessage></error></errors></apiResponse>",
        )
        .unwrap();

        let error = doc.root.get("errors").and_then(|e| e.get("error")).unwrap();
        assert!(error.as_map().is_some());
    }

    #[test]
    fn entity_references_decode_to_characters() {
        let doc =
            from_xml("<apiResponse><errorMessage>a -&gt; b &amp; c</errorMessage></apiResponse>")
                .unwrap();

        assert_eq!(
            doc.root.get("errorMessage"),
            Some(&Value::text("a -> b & c"))
        );
    }

    #[test]
    fn special_characters_survive_a_round_trip() {
        let mut body = Map::new();
        body.insert("note", r#"5 < 7 & "quoted" -> done"#);

        let xml = to_xml("apiRequest", &Value::Map(body.clone())).unwrap();
        let doc = from_xml(&xml).unwrap();
        assert_eq!(doc.root, Value::Map(body));
    }

    #[test]
    fn attributes_are_ignored() {
        let doc = from_xml(r#"<apiResponse version="2"><id type="int">7</id></apiResponse>"#)
            .unwrap();
        assert_eq!(doc.root.get("id"), Some(&Value::text("7")));
    }

    #[test]
    fn malformed_xml_is_a_decode_error() {
        for text in ["", "not xml", "<unclosed>", "<a></b>"] {
            let err = from_xml(text).unwrap_err();
            assert!(matches!(err, CodecError::Decode(_)), "input {text:?}");
        }
    }

    // Strategy for trees the dialect can represent: unique keys per map,
    // no sequence directly inside a sequence, no one-element sequences
    // (those decode as a plain value), and text without edge whitespace
    // (the parser trims it).
    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = "[a-z0-9]{1,10}".prop_map(Value::Text);
        leaf.prop_recursive(3, 16, 3, |inner| {
            let map = prop::collection::btree_map("[a-z][a-z0-9]{0,6}", inner.clone(), 1..3usize)
                .prop_map(|entries| Value::Map(entries.into_iter().collect()));
            let seq_item = prop_oneof![
                "[a-z0-9]{1,10}".prop_map(Value::Text),
                prop::collection::btree_map("[a-z][a-z0-9]{0,6}", inner, 1..3usize)
                    .prop_map(|entries| Value::Map(entries.into_iter().collect())),
            ];
            prop_oneof![
                map,
                prop::collection::vec(seq_item, 2..4usize).prop_map(Value::Seq),
            ]
        })
    }

    fn body_strategy() -> impl Strategy<Value = Map> {
        prop::collection::btree_map("[a-z][a-z0-9]{0,6}", value_strategy(), 1..4usize)
            .prop_map(|entries| entries.into_iter().collect())
    }

    proptest! {
        #[test]
        fn round_trips_through_xml(body in body_strategy()) {
            let xml = to_xml("apiRequest", &Value::Map(body.clone())).unwrap();
            let doc = from_xml(&xml).unwrap();
            prop_assert_eq!(doc.root_name, "apiRequest");
            prop_assert_eq!(doc.root, Value::Map(body));
        }
    }
}
