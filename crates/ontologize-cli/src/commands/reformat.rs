//! `ontologize reformat` command implementation
//!
//! Adds term names, definitions and annotated genes to an Ontologizer results
//! table and writes it next to the original with a `.reformatted` suffix.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::ontologizer::OutputFiles;
use crate::TargetArgs;
use colored::Colorize;
use ontologize_common::files::DataFiles;
use ontologize_go::report::{reformat_table, AnnotationLookups, ResultsTable};
use ontologize_go::{Calculation, LookupTable};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reformat the results table of one run
pub async fn run(
    config: &Config,
    target: &TargetArgs,
    threshold: Option<f64>,
    lookup: Option<PathBuf>,
) -> Result<()> {
    let lookup = lookup.unwrap_or_else(|| DataFiles::new(&config.data_dir).lookup());
    let written = reformat(&target.output(), &lookup, target.calculation, threshold)?;

    println!("{} Wrote {}", "✓".green(), written.display());
    Ok(())
}

/// Write `<table>.reformatted` for a finished run
pub fn reformat(
    output: &OutputFiles,
    lookup: &Path,
    calculation: Calculation,
    threshold: Option<f64>,
) -> Result<PathBuf> {
    for path in [output.table(), output.annotations()] {
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
    }
    if !lookup.exists() {
        return Err(CliError::FileNotFound(lookup.to_path_buf()));
    }

    info!(lookup = %lookup.display(), "Creating annotation lookups");
    let table = LookupTable::load(lookup)?;
    let annotations = AnnotationLookups::read(output.annotations())?;
    let results = ResultsTable::read(output.table())?;

    let reformatted = reformat_table(&results, &table, &annotations, calculation, threshold)?;

    let path = output.reformatted_table();
    reformatted.write(&path)?;
    info!(path = %path.display(), rows = reformatted.rows.len(), "Wrote reformatted table");
    Ok(path)
}
