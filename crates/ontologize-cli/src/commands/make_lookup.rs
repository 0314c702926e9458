//! `ontologize make-lookup` command implementation
//!
//! Parses the Gene Ontology OBO file and writes the id -> term JSON table.

use crate::config::Config;
use crate::error::{CliError, Result};
use colored::Colorize;
use ontologize_common::files::DataFiles;
use ontologize_go::{BuildOptions, LookupBuilder, LookupTable, TracingReporter};
use std::path::{Path, PathBuf};

/// Build the lookup table
pub async fn run(
    config: &Config,
    obo: Option<PathBuf>,
    output: Option<PathBuf>,
    strict: bool,
    pretty: bool,
) -> Result<()> {
    let files = DataFiles::new(&config.data_dir);
    let obo = obo.unwrap_or_else(|| files.obo());
    let output = output.unwrap_or_else(|| files.lookup());

    let options = if strict {
        BuildOptions::strict()
    } else {
        BuildOptions::default()
    };

    let table = build_lookup(&obo, &output, options, pretty)?;

    println!(
        "{} Wrote {} terms to {}",
        "✓".green(),
        table.len(),
        output.display()
    );
    Ok(())
}

/// Parse `obo` and save the table to `output`
pub fn build_lookup(
    obo: &Path,
    output: &Path,
    options: BuildOptions,
    pretty: bool,
) -> Result<LookupTable> {
    if !obo.exists() {
        return Err(CliError::FileNotFound(obo.to_path_buf()));
    }

    let mut reporter = TracingReporter::new(&obo.display().to_string());
    let table = LookupBuilder::new(options, &mut reporter).build_from_path(obo)?;

    if pretty {
        table.save_pretty(output)?;
    } else {
        table.save(output)?;
    }
    Ok(table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const OBO: &str = "format-version: 1.2\n\n[Term]\nid: GO:0000001\nname: mitochondrion inheritance\n\n[Term]\nid: GO:0000002\nname: mitochondrial genome maintenance\n";

    #[tokio::test]
    async fn test_defaults_to_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config::default().with_data_dir(dir.path());
        let files = DataFiles::new(dir.path());
        std::fs::write(files.obo(), OBO).unwrap();

        run(&config, None, None, false, false).await.unwrap();

        let table = LookupTable::load(files.lookup()).unwrap();
        assert_eq!(table.ids().collect::<Vec<_>>(), ["GO:0000001", "GO:0000002"]);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let dir = TempDir::new().unwrap();
        let obo = dir.path().join("go.obo");
        let output = dir.path().join("lookup.json");
        std::fs::write(&obo, OBO).unwrap();

        build_lookup(&obo, &output, BuildOptions::default(), true).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("\n  \"GO:0000001\""));
        assert_eq!(LookupTable::load(&output).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_obo() {
        let dir = TempDir::new().unwrap();

        let err = build_lookup(
            &dir.path().join("absent.obo"),
            &dir.path().join("out.json"),
            BuildOptions::default(),
            false,
        )
        .unwrap_err();

        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
