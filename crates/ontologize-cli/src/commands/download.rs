//! `ontologize download` command implementation
//!
//! Fetches the Ontologizer jar, one gene association file and the ontology into
//! the data directory, then builds the lookup table.

use crate::commands::make_lookup::build_lookup;
use crate::config::Config;
use crate::download::{AssociationSource, DownloadOutcome, Downloader};
use crate::error::Result;
use crate::progress::format_bytes;
use colored::Colorize;
use ontologize_go::BuildOptions;
use std::path::Path;

/// Download source data
pub async fn run(config: &Config, source: AssociationSource, force: bool, skip_lookup: bool) -> Result<()> {
    let downloader = Downloader::new(config.clone())?;

    println!("{} Fetching source data into {}", "→".cyan(), config.data_dir.display());

    let (jar, outcome) = downloader.download_jar(force).await?;
    report(&jar, outcome);

    let (associations, outcome) = downloader.download_associations(&source, force).await?;
    report(&associations, outcome);

    let (obo, obo_outcome) = downloader.download_obo(force).await?;
    report(&obo, obo_outcome);

    if skip_lookup {
        return Ok(());
    }

    let lookup = downloader.files().lookup();
    if !force && obo_outcome == DownloadOutcome::Skipped && lookup.exists() {
        println!("{} {} (up to date)", "✓".green(), lookup.display());
        return Ok(());
    }

    let table = build_lookup(&obo, &lookup, BuildOptions::default(), false)?;
    println!(
        "{} Wrote {} terms to {}",
        "✓".green(),
        table.len(),
        lookup.display()
    );
    Ok(())
}

fn report(path: &Path, outcome: DownloadOutcome) {
    match outcome {
        DownloadOutcome::Downloaded(bytes) => {
            println!("{} {} ({})", "✓".green(), path.display(), format_bytes(bytes))
        },
        DownloadOutcome::Skipped => println!("{} {} (exists)", "✓".green(), path.display()),
    }
}
