// GO term lookup table: build, persist, load

use crate::obo::{OboParser, TermRecord};
use crate::reporter::{BuildReporter, BuildSummary, TracingReporter};
use crate::{GoError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Term id -> record, in source-file order
///
/// Built once per ontology release and read-only afterwards. Every key equals
/// the id of the record stored under it.
///
/// Persisted as one JSON object:
/// `{"GO:0000001": {"id": ["GO:0000001"], "name": ["..."]}, ...}`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    index: HashMap<String, usize>,
    records: Vec<TermRecord>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its id
    ///
    /// A record with the same id is replaced in place and returned; the key
    /// keeps its original position.
    pub fn insert(&mut self, record: TermRecord) -> Option<TermRecord> {
        match self.index.get(record.id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.id().to_string(), self.records.len());
                self.records.push(record);
                None
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<&TermRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TermRecord> {
        self.records.iter()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(TermRecord::id)
    }

    /// `name` values of a term joined with `;`
    pub fn name_of(&self, id: &str) -> Option<String> {
        self.get(id).and_then(|record| record.joined("name", ";"))
    }

    /// `def` values of a term joined with `;`
    pub fn definition_of(&self, id: &str) -> Option<String> {
        self.get(id).and_then(|record| record.joined("def", ";"))
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn to_writer_pretty<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the table to `path` as compact JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path.as_ref(), false)
    }

    /// Write the table to `path` as indented JSON
    pub fn save_pretty(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(path.as_ref(), true)
    }

    fn save_with(&self, path: &Path, pretty: bool) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GoError::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| GoError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        if pretty {
            self.to_writer_pretty(&mut writer)?;
        } else {
            self.to_writer(&mut writer)?;
        }
        writer.flush().map_err(|e| GoError::io(path, e))?;

        info!(path = %path.display(), terms = self.len(), "Wrote GO lookup table");
        Ok(())
    }

    /// Load a table previously written by [`LookupTable::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GoError::io(path, e))?;
        let table = Self::from_reader(BufReader::new(file))?;

        debug!(path = %path.display(), terms = table.len(), "Loaded GO lookup table");
        Ok(table)
    }
}

impl Serialize for LookupTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(record.id(), record)?;
        }
        map.end()
    }
}

struct LookupTableVisitor;

impl<'de> Visitor<'de> for LookupTableVisitor {
    type Value = LookupTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping GO term ids to term field maps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<LookupTable, A::Error> {
        let mut table = LookupTable::new();
        while let Some((key, record)) = access.next_entry::<String, TermRecord>()? {
            if key != record.id() {
                return Err(de::Error::custom(format!(
                    "lookup key '{}' does not match term id '{}'",
                    key,
                    record.id()
                )));
            }
            table.insert(record);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for LookupTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(LookupTableVisitor)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Build behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Fail on a repeated term id instead of keeping the later block
    pub strict_duplicates: bool,
}

impl BuildOptions {
    pub fn strict() -> Self {
        BuildOptions {
            strict_duplicates: true,
        }
    }
}

/// Collects parsed records into a [`LookupTable`]
pub struct LookupBuilder<'r> {
    options: BuildOptions,
    reporter: &'r mut dyn BuildReporter,
}

impl<'r> LookupBuilder<'r> {
    pub fn new(options: BuildOptions, reporter: &'r mut dyn BuildReporter) -> Self {
        LookupBuilder { options, reporter }
    }

    /// Insert every record, stopping at the first error
    ///
    /// Nothing is returned on error, so a failed build never leaves a partial
    /// table behind.
    pub fn build<I>(self, records: I) -> Result<LookupTable>
    where
        I: IntoIterator<Item = Result<TermRecord>>,
    {
        let mut table = LookupTable::new();
        let mut summary = BuildSummary::default();

        for record in records {
            let record = record?;
            summary.records += 1;

            if self.options.strict_duplicates && table.contains(record.id()) {
                return Err(GoError::DuplicateId(record.id().to_string()));
            }

            self.reporter.term_added(&record, summary.records);
            let id = record.id().to_string();
            if table.insert(record).is_some() {
                summary.replaced += 1;
                self.reporter.duplicate_replaced(&id);
            }
        }

        summary.terms = table.len();
        self.reporter.finished(&summary);
        Ok(table)
    }

    pub fn build_from_reader<R: BufRead>(self, reader: R) -> Result<LookupTable> {
        self.build(OboParser::new(reader))
    }

    pub fn build_from_path(self, path: impl AsRef<Path>) -> Result<LookupTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GoError::io(path, e))?;
        self.build_from_reader(BufReader::new(file))
    }
}

/// Parse an OBO file and write its lookup table as JSON
pub fn obo_to_json(
    obo: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: BuildOptions,
) -> Result<LookupTable> {
    let obo = obo.as_ref();
    let mut reporter = TracingReporter::new(&obo.display().to_string());

    let table = LookupBuilder::new(options, &mut reporter).build_from_path(obo)?;
    table.save(output)?;
    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
