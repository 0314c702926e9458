// Term fields in block order

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Field name -> values, fields in the order they first appear in the block
///
/// A term carries a dozen or so distinct fields, so lookups scan the entries.
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; a new field goes after every existing one
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.into()),
            None => self.entries.push((key.to_string(), vec![value.into()])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

struct FieldMapVisitor;

impl<'de> Visitor<'de> for FieldMapVisitor {
    type Value = FieldMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping field names to lists of values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldMap, A::Error> {
        let mut fields = FieldMap::new();
        while let Some((key, values)) = access.next_entry::<String, Vec<String>>()? {
            for value in values {
                fields.push(&key, value);
            }
        }
        Ok(fields)
    }
}

impl<'de> Deserialize<'de> for FieldMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMapVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let mut fields = FieldMap::new();
        fields.push("id", "GO:0000001");
        fields.push("name", "mitochondrion inheritance");
        fields.push("is_a", "GO:0048308");
        fields.push("def", "\"text\" []");
        fields.push("is_a", "GO:0048311");

        assert_eq!(fields.keys().collect::<Vec<_>>(), ["id", "name", "is_a", "def"]);
        assert_eq!(fields.get("is_a").unwrap(), ["GO:0048308", "GO:0048311"]);
        assert_eq!(fields.len(), 4);
        assert!(fields.get("synonym").is_none());
    }

    #[test]
    fn test_json_object_keeps_order() {
        let mut fields = FieldMap::new();
        fields.push("name", "b");
        fields.push("id", "GO:2");

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"name":["b"],"id":["GO:2"]}"#);

        let back: FieldMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
    }
}
