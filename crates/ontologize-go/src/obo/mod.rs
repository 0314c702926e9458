// OBO flat-file parsing
//
// Only `[Term]` stanzas are read. The first `[Typedef]` stanza ends the term
// section and parsing stops there.

pub mod fields;
pub mod parser;
pub mod record;

pub use parser::{OboParser, TERM_MARKER, TYPEDEF_MARKER};
pub use fields::FieldMap;
pub use record::TermRecord;
