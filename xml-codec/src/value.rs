//! The generic tree that maps onto the provider's XML dialect.
//!
//! The Maxoptra wire format is plain "tags as keys" XML: a map entry becomes
//! a child element, a sequence becomes repeated sibling elements, and a
//! scalar becomes element text. `Value` models exactly that shape, nothing
//! more. Entry order is preserved because it is significant both for the
//! request envelope layout and for error-message concatenation.

/// A node in a request or response tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar text content of a leaf element.
    Text(String),
    /// Repeated sibling elements sharing one tag name.
    Seq(Vec<Value>),
    /// An element with named children, in insertion order.
    Map(Map),
}

impl Value {
    /// Build a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    /// The text content, if this is a scalar node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The entries, if this is a map node.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The items, if this is a sequence node.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a child by key. Returns `None` for non-map nodes.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Text(number.to_string())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Value::Text(number.to_string())
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Text(number.to_string())
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Text(flag.to_string())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

/// An insertion-ordered set of named child nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicate keys are allowed; they serialize as
    /// repeated sibling elements, the same as a `Seq`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First entry with the given key, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Append a decoded child, collapsing repeated keys into a `Seq`.
    pub(crate) fn push_grouped(&mut self, key: String, value: Value) {
        if let Some((_, existing)) = self
            .entries
            .iter_mut()
            .find(|(entry_key, _)| *entry_key == key)
        {
            match existing {
                Value::Seq(items) => items.push(value),
                _ => {
                    let first = std::mem::replace(existing, Value::Seq(Vec::new()));
                    *existing = Value::Seq(vec![first, value]);
                }
            }
        } else {
            self.entries.push((key, value));
        }
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Map {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut map = Map::new();
        map.insert("b", "2");
        map.insert("a", "1");
        map.insert("c", "3");

        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn get_returns_first_match() {
        let mut map = Map::new();
        map.insert("key", "first");
        map.insert("key", "second");

        assert_eq!(map.get("key"), Some(&Value::text("first")));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn value_get_traverses_maps_only() {
        let mut inner = Map::new();
        inner.insert("status", "Created");
        let mut outer = Map::new();
        outer.insert("order", inner);

        let value = Value::Map(outer);
        assert_eq!(
            value.get("order").and_then(|order| order.get("status")),
            Some(&Value::text("Created"))
        );
        assert_eq!(Value::text("leaf").get("anything"), None);
    }

    #[test]
    fn push_grouped_collapses_repeats() {
        let mut map = Map::new();
        map.push_grouped("error".to_owned(), Value::text("A"));
        assert_eq!(map.get("error"), Some(&Value::text("A")));

        map.push_grouped("error".to_owned(), Value::text("B"));
        map.push_grouped("error".to_owned(), Value::text("C"));
        assert_eq!(
            map.get("error"),
            Some(&Value::Seq(vec![
                Value::text("A"),
                Value::text("B"),
                Value::text("C"),
            ]))
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn scalar_conversions_become_text() {
        assert_eq!(Value::from(42i64), Value::text("42"));
        assert_eq!(Value::from(7u64), Value::text("7"));
        assert_eq!(Value::from(true), Value::text("true"));
        assert_eq!(Value::from("abc"), Value::text("abc"));
    }
}
