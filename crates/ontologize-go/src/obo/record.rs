// Gene Ontology term record

use crate::obo::fields::FieldMap;
use crate::{GoError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Field holding the term identifier
pub const ID_FIELD: &str = "id";

/// One parsed `[Term]` block
///
/// Every field maps to a sequence of values because OBO fields repeat
/// (`is_a`, `synonym`, `xref`, ...). A missing field is `None`, never an empty
/// sequence.
///
/// Serializes as the bare field map:
/// `{"id": ["GO:0000001"], "is_a": ["GO:0048308", "GO:0048311"], ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FieldMap")]
pub struct TermRecord {
    id: String,
    fields: FieldMap,
    raw: Vec<String>,
}

impl TermRecord {
    /// Build a record from the trimmed `key: value` lines of one block
    ///
    /// `first_line` is only used to locate the block in error messages.
    pub fn from_lines<I, S>(lines: I, first_line: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = FieldMap::new();
        let mut raw = Vec::new();

        for (offset, line) in lines.into_iter().enumerate() {
            let line: String = line.into();
            let (key, value) = split_field(&line).ok_or_else(|| GoError::MalformedLine {
                line_number: first_line + offset,
                line: line.clone(),
            })?;
            fields.push(key, value);
            raw.push(line);
        }

        Self::assemble(fields, raw, first_line)
    }

    pub(crate) fn assemble(fields: FieldMap, raw: Vec<String>, first_line: usize) -> Result<Self> {
        // Repeated id lines: the last one names the term
        let id = fields
            .get(ID_FIELD)
            .and_then(<[String]>::last)
            .filter(|id| !id.is_empty())
            .cloned()
            .ok_or_else(|| GoError::MissingId {
                line_number: first_line,
                block: raw.join("\n"),
            })?;

        Ok(TermRecord { id, fields, raw })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// All values of a field, in block order
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field)
    }

    /// First value of a field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|values| values.first()).map(String::as_str)
    }

    /// All values of a field joined with `sep`
    pub fn joined(&self, field: &str, sep: &str) -> Option<String> {
        self.get(field).map(|values| values.join(sep))
    }

    pub fn name(&self) -> Option<&str> {
        self.first("name")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// The trimmed, non-empty lines the block was parsed from
    pub fn raw_lines(&self) -> &[String] {
        &self.raw
    }

    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}

/// Split at the first colon; both halves trimmed
pub(crate) fn split_field(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

impl fmt::Display for TermRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw.join("\n"))
    }
}

impl Serialize for TermRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl TryFrom<FieldMap> for TermRecord {
    type Error = GoError;

    /// Rebuild a record from its serialized field map
    ///
    /// The original block layout is not stored, so raw lines are regenerated as
    /// `key: value`, fields in block order and values in order within a field.
    fn try_from(fields: FieldMap) -> Result<Self> {
        let raw = fields
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| format!("{key}: {value}")))
            .collect();
        Self::assemble(fields, raw, 0)
    }
}
