// Ontologizer results post-processing
//
// - table: tab-separated results tables
// - annotations: gene <-> GO term lookups from the `anno-*.txt` file
// - reformat: results enriched with term names, definitions and genes
// - revigo: REVIGO submission built from significant terms

pub mod annotations;
pub mod reformat;
pub mod revigo;
pub mod table;

pub use annotations::AnnotationLookups;
pub use reformat::reformat_table;
pub use revigo::RevigoRequest;
pub use table::ResultsTable;
